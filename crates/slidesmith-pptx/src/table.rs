//! Table shapes and cell formatting.
//!
//! Row and column counts are fixed at creation; cells are addressed by
//! (row, col) and hold an independent text frame plus optional fill.

use crate::error::{DeckError, Result};
use crate::text::{Alignment, Rgb, TextFormat, TextFrame, VerticalAnchor};

/// A cell in a table grid
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Cell text
    pub frame: TextFrame,

    /// Background fill
    pub fill: Option<Rgb>,
}

/// Formatting options for a single cell.
///
/// Every field is independently optional.
#[derive(Debug, Clone, Default)]
pub struct CellFormat {
    pub font_name: Option<String>,
    pub font_size_pt: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Rgb>,
    pub bg_color: Option<Rgb>,
    pub alignment: Option<Alignment>,
    pub vertical: Option<VerticalAnchor>,
}

/// A table shape on a slide
#[derive(Debug, Clone)]
pub struct Table {
    /// Shape display name
    pub name: String,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),

    rows: usize,
    cols: usize,

    /// Cells in row-major order
    cells: Vec<Cell>,

    /// Column widths in EMU, summing to the table width
    col_widths: Vec<i64>,
}

impl Table {
    /// Create a table with the given grid.
    ///
    /// Columns start evenly sized; fails with `InvalidDimensions` when
    /// either count is zero.
    pub fn new(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        position: (i64, i64),
        size: (i64, i64),
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(DeckError::InvalidDimensions { rows, cols });
        }

        let even = size.0 / cols as i64;
        Ok(Self {
            name: name.into(),
            position,
            size,
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            col_widths: vec![even; cols],
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column widths in EMU
    pub fn col_widths(&self) -> &[i64] {
        &self.col_widths
    }

    /// Height of each row in EMU (rows share the table height evenly)
    pub fn row_height(&self) -> i64 {
        self.size.1 / self.rows as i64
    }

    /// Redistribute column widths by ratio.
    ///
    /// Extra ratios are ignored, missing ones keep the even split; the
    /// ratios are normalized over the table width.
    pub fn set_column_ratios(&mut self, ratios: &[f32]) {
        let total: f32 = ratios.iter().take(self.cols).sum();
        if total <= 0.0 {
            return;
        }
        for (i, width) in self.col_widths.iter_mut().enumerate() {
            if let Some(ratio) = ratios.get(i) {
                *width = (self.size.0 as f64 * (*ratio / total) as f64) as i64;
            }
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(DeckError::CellOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Get a cell
    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    /// Get a cell mutably
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let idx = self.index(row, col)?;
        Ok(&mut self.cells[idx])
    }

    /// Replace a cell's text with a single plain paragraph
    pub fn set_cell_text(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        self.cell_mut(row, col)?.frame.set_text(text);
        Ok(())
    }

    /// Apply formatting to one cell; absent options leave the cell untouched
    pub fn format_cell(&mut self, row: usize, col: usize, format: &CellFormat) -> Result<()> {
        let cell = self.cell_mut(row, col)?;

        cell.frame.apply_format(&TextFormat {
            font_name: format.font_name.clone(),
            font_size_pt: format.font_size_pt,
            bold: format.bold,
            italic: format.italic,
            color: format.color,
            alignment: format.alignment,
        });

        if format.vertical.is_some() {
            cell.frame.anchor = format.vertical;
        }
        if let Some(bg) = format.bg_color {
            cell.fill = Some(bg);
        }

        Ok(())
    }

    /// Cell text in row-major order, for inspection and tests
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| self.cells[r * self.cols + c].frame.text())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new("Table 1", 3, 2, (914_400, 1_828_800), (7_315_200, 4_114_800)).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Table::new("t", 0, 2, (0, 0), (100, 100)).unwrap_err();
        assert!(matches!(err, DeckError::InvalidDimensions { rows: 0, cols: 2 }));

        assert!(Table::new("t", 2, 0, (0, 0), (100, 100)).is_err());
    }

    #[test]
    fn test_set_and_read_cell_text() {
        let mut table = sample_table();
        table.set_cell_text(0, 0, "Term").unwrap();
        table.set_cell_text(0, 1, "Concept").unwrap();

        assert_eq!(table.cell(0, 0).unwrap().frame.text(), "Term");
        assert_eq!(table.cell_texts()[0], vec!["Term", "Concept"]);
    }

    #[test]
    fn test_cell_out_of_range() {
        let mut table = sample_table();
        let err = table.set_cell_text(3, 0, "late").unwrap_err();
        assert!(matches!(err, DeckError::CellOutOfRange { row: 3, .. }));
        assert!(table.cell(0, 2).is_err());
    }

    #[test]
    fn test_format_cell() {
        let mut table = sample_table();
        table.set_cell_text(0, 0, "Header").unwrap();
        table
            .format_cell(
                0,
                0,
                &CellFormat {
                    bold: Some(true),
                    bg_color: Some(Rgb::new(230, 240, 255)),
                    vertical: Some(VerticalAnchor::Middle),
                    alignment: Some(Alignment::Center),
                    ..CellFormat::default()
                },
            )
            .unwrap();

        let cell = table.cell(0, 0).unwrap();
        assert!(cell.frame.paragraphs[0].runs[0].style.bold);
        assert_eq!(cell.fill, Some(Rgb::new(230, 240, 255)));
        assert_eq!(cell.frame.anchor, Some(VerticalAnchor::Middle));
        assert_eq!(cell.frame.paragraphs[0].alignment, Some(Alignment::Center));
    }

    #[test]
    fn test_column_ratios() {
        let mut table = sample_table();
        table.set_column_ratios(&[0.3, 0.7]);

        let widths = table.col_widths();
        assert_eq!(widths.len(), 2);
        assert!(widths[0] < widths[1]);
        // Ratios are normalized over the full width
        let sum: i64 = widths.iter().sum();
        assert!((sum - table.size.0).abs() < 4);
    }

    #[test]
    fn test_row_height_shares_evenly() {
        let table = sample_table();
        assert_eq!(table.row_height(), 4_114_800 / 3);
    }
}
