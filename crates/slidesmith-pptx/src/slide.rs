//! A single slide: placeholders inherited from its layout plus free shapes.
//!
//! Placeholders are addressed by their layout `idx`. Content lookups go
//! through the placeholder roles first and fall back to display-name
//! matching, so decks whose layouts carry untyped placeholders still
//! resolve a body or subtitle target.

use crate::chart::Chart;
use crate::error::{DeckError, Result};
use crate::image::Picture;
use crate::layout::{PlaceholderRole, SlideLayout};
use crate::shape::{AutoShape, Shape, ShapeKind, TextBox};
use crate::table::Table;
use crate::text::{TextFormat, TextFrame};

/// A placeholder instance on a slide
#[derive(Debug, Clone)]
pub struct Placeholder {
    /// Placeholder index, matching the layout's `idx`
    pub idx: u32,

    /// Role inherited from the layout
    pub role: PlaceholderRole,

    /// Display name inherited from the layout
    pub name: String,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),

    /// Text content
    pub frame: TextFrame,
}

impl Placeholder {
    /// True when the placeholder has any text
    pub fn has_text(&self) -> bool {
        !self.frame.is_empty()
    }
}

/// One slide of a presentation
#[derive(Debug, Clone)]
pub struct Slide {
    /// Index of the layout this slide was created from
    pub layout_index: usize,

    /// Name of the layout this slide was created from
    pub layout_name: String,

    /// Placeholders inherited from the layout
    pub placeholders: Vec<Placeholder>,

    /// Free shapes added on top of the placeholders
    pub shapes: Vec<Shape>,

    next_shape_id: usize,
}

impl Slide {
    /// Create a slide carrying the layout's placeholders, all empty
    pub fn from_layout(layout: &SlideLayout) -> Self {
        let placeholders: Vec<Placeholder> = layout
            .placeholders
            .iter()
            .map(|spec| Placeholder {
                idx: spec.idx,
                role: spec.role,
                name: spec.name.clone(),
                position: spec.position,
                size: spec.size,
                frame: TextFrame::new(),
            })
            .collect();
        // Shape id 1 is the group shape, placeholders take the next ids
        let next_shape_id = placeholders.len() + 2;
        Self {
            layout_index: layout.index,
            layout_name: layout.name.clone(),
            placeholders,
            shapes: Vec::new(),
            next_shape_id,
        }
    }

    fn next_name(&mut self, base: &str) -> String {
        let name = format!("{} {}", base, self.next_shape_id);
        self.next_shape_id += 1;
        name
    }

    /// Re-seed the shape id counter after shapes were pushed directly,
    /// as the archive reader does
    pub(crate) fn sync_shape_counter(&mut self) {
        self.next_shape_id = self.placeholders.len() + self.shapes.len() + 2;
    }

    /// The slide title, when a title placeholder exists and has text
    pub fn title(&self) -> Option<String> {
        self.placeholders
            .iter()
            .find(|p| p.role.is_title() && p.has_text())
            .map(|p| p.frame.text())
    }

    /// Set the title text.
    ///
    /// Fails when the layout carries no title placeholder, which is the
    /// case for the blank layout.
    pub fn set_title(&mut self, text: &str) -> Result<()> {
        let layout = self.layout_name.clone();
        let title = self
            .placeholders
            .iter_mut()
            .find(|p| p.role.is_title())
            .ok_or_else(|| DeckError::no_title_placeholder(layout))?;
        title.frame.set_text(text);
        Ok(())
    }

    /// Look up a placeholder by its layout index
    pub fn placeholder(&self, idx: u32) -> Result<&Placeholder> {
        self.placeholders
            .iter()
            .find(|p| p.idx == idx)
            .ok_or(DeckError::PlaceholderNotFound { idx })
    }

    /// Look up a placeholder by its layout index, mutably
    pub fn placeholder_mut(&mut self, idx: u32) -> Result<&mut Placeholder> {
        self.placeholders
            .iter_mut()
            .find(|p| p.idx == idx)
            .ok_or(DeckError::PlaceholderNotFound { idx })
    }

    /// Write text into the placeholder with the given index
    pub fn populate_placeholder(&mut self, idx: u32, text: &str) -> Result<()> {
        self.placeholder_mut(idx)?.frame.set_text(text);
        Ok(())
    }

    /// The main content placeholder, when the layout has one.
    ///
    /// Prefers the body/object roles, then falls back to placeholders
    /// whose display name mentions content or text.
    pub fn body_placeholder_mut(&mut self) -> Option<&mut Placeholder> {
        let by_role = self
            .placeholders
            .iter()
            .position(|p| p.role.is_body_content());
        let index = by_role.or_else(|| {
            self.placeholders.iter().position(|p| {
                let name = p.name.to_lowercase();
                !p.role.is_title() && (name.contains("content") || name.contains("text"))
            })
        })?;
        self.placeholders.get_mut(index)
    }

    /// The subtitle placeholder, when the layout has one
    pub fn subtitle_placeholder_mut(&mut self) -> Option<&mut Placeholder> {
        let by_role = self
            .placeholders
            .iter()
            .position(|p| p.role == PlaceholderRole::Subtitle);
        let index = by_role.or_else(|| {
            self.placeholders
                .iter()
                .position(|p| p.name.to_lowercase().contains("subtitle"))
        })?;
        self.placeholders.get_mut(index)
    }

    /// Apply run and paragraph formatting to a placeholder's text
    pub fn format_placeholder(&mut self, idx: u32, format: &TextFormat) -> Result<()> {
        self.placeholder_mut(idx)?.frame.apply_format(format);
        Ok(())
    }

    /// Add a free textbox and return it for further setup
    pub fn add_textbox(
        &mut self,
        position: (i64, i64),
        size: (i64, i64),
        text: &str,
    ) -> &mut TextBox {
        let name = self.next_name("TextBox");
        self.shapes.push(Shape::TextBox(TextBox {
            name,
            position,
            size,
            frame: TextFrame::from_text(text),
        }));
        match self.shapes.last_mut() {
            Some(Shape::TextBox(textbox)) => textbox,
            _ => unreachable!("textbox was just pushed"),
        }
    }

    /// Add a preset-geometry autoshape and return it for further setup
    pub fn add_auto_shape(
        &mut self,
        kind: ShapeKind,
        position: (i64, i64),
        size: (i64, i64),
    ) -> &mut AutoShape {
        let name = self.next_name(kind.display_name());
        self.shapes
            .push(Shape::Auto(AutoShape::new(name, kind, position, size)));
        match self.shapes.last_mut() {
            Some(Shape::Auto(shape)) => shape,
            _ => unreachable!("autoshape was just pushed"),
        }
    }

    /// Add an empty table and return it for cell population
    pub fn add_table(
        &mut self,
        rows: usize,
        cols: usize,
        position: (i64, i64),
        size: (i64, i64),
    ) -> Result<&mut Table> {
        let name = self.next_name("Table");
        let table = Table::new(name, rows, cols, position, size)?;
        self.shapes.push(Shape::Table(table));
        match self.shapes.last_mut() {
            Some(Shape::Table(table)) => Ok(table),
            _ => unreachable!("table was just pushed"),
        }
    }

    /// Add a placed picture
    pub fn add_picture(&mut self, mut picture: Picture) -> &mut Picture {
        picture.name = self.next_name("Picture");
        self.shapes.push(Shape::Picture(picture));
        match self.shapes.last_mut() {
            Some(Shape::Picture(picture)) => picture,
            _ => unreachable!("picture was just pushed"),
        }
    }

    /// Add a validated chart
    pub fn add_chart(&mut self, mut chart: Chart) -> &mut Chart {
        chart.name = self.next_name("Chart");
        self.shapes.push(Shape::Chart(chart));
        match self.shapes.last_mut() {
            Some(Shape::Chart(chart)) => chart,
            _ => unreachable!("chart was just pushed"),
        }
    }

    /// All text on the slide, placeholders first, then shapes
    pub fn all_text(&self) -> Vec<String> {
        let mut out = Vec::new();
        for p in &self.placeholders {
            if p.has_text() {
                out.push(p.frame.text());
            }
        }
        for shape in &self.shapes {
            match shape {
                Shape::TextBox(t) if !t.frame.is_empty() => out.push(t.frame.text()),
                Shape::Auto(s) if !s.frame.is_empty() => out.push(s.frame.text()),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin_layouts;

    fn slide_from(index: usize) -> Slide {
        let layouts = builtin_layouts();
        Slide::from_layout(&layouts[index])
    }

    #[test]
    fn test_title_roundtrip() {
        let mut slide = slide_from(0);
        assert!(slide.title().is_none());

        slide.set_title("Opening").unwrap();
        assert_eq!(slide.title().as_deref(), Some("Opening"));
    }

    #[test]
    fn test_blank_layout_has_no_title() {
        let mut slide = slide_from(6);
        let err = slide.set_title("nope").unwrap_err();
        assert!(matches!(err, DeckError::NoTitlePlaceholder { .. }));
        assert!(err.to_string().contains("Blank"));
    }

    #[test]
    fn test_placeholder_lookup() {
        let mut slide = slide_from(1);
        slide.populate_placeholder(1, "first line\nsecond line").unwrap();
        assert_eq!(slide.placeholder(1).unwrap().frame.text(), "first line\nsecond line");

        let err = slide.populate_placeholder(99, "x").unwrap_err();
        assert!(matches!(err, DeckError::PlaceholderNotFound { idx: 99 }));
    }

    #[test]
    fn test_body_placeholder_by_role() {
        let mut slide = slide_from(1);
        let body = slide.body_placeholder_mut().unwrap();
        assert_eq!(body.idx, 1);
    }

    #[test]
    fn test_body_placeholder_name_fallback() {
        let mut slide = slide_from(1);
        // Erase the role so only the display name can match
        for p in &mut slide.placeholders {
            if p.idx == 1 {
                p.role = PlaceholderRole::Other;
                p.name = "Content Placeholder 2".into();
            }
        }
        let body = slide.body_placeholder_mut().unwrap();
        assert_eq!(body.idx, 1);
    }

    #[test]
    fn test_subtitle_placeholder() {
        let mut slide = slide_from(0);
        let subtitle = slide.subtitle_placeholder_mut().unwrap();
        subtitle.frame.set_text("A course");
        assert_eq!(slide.placeholder(1).unwrap().frame.text(), "A course");

        // Content layout has no subtitle
        let mut content = slide_from(1);
        assert!(content.subtitle_placeholder_mut().is_none());
    }

    #[test]
    fn test_shape_names_count_up() {
        let mut slide = slide_from(6);
        let first = slide.add_textbox((0, 0), (914_400, 914_400), "a").name.clone();
        let second = slide.add_textbox((0, 0), (914_400, 914_400), "b").name.clone();
        assert_ne!(first, second);
        assert!(first.starts_with("TextBox "));
    }

    #[test]
    fn test_add_table_validates() {
        let mut slide = slide_from(6);
        assert!(slide.add_table(0, 3, (0, 0), (914_400, 914_400)).is_err());
        let table = slide.add_table(2, 3, (0, 0), (914_400, 914_400)).unwrap();
        assert_eq!((table.rows(), table.cols()), (2, 3));
    }

    #[test]
    fn test_rejected_chart_adds_no_shape() {
        use crate::chart::{ChartData, ChartKind, Series};

        let mut slide = slide_from(6);
        let short = ChartData::new(
            vec!["A".into(), "B".into()],
            vec![Series::new("S", vec![1.0])],
        );
        assert!(Chart::new("c", ChartKind::Pie, (0, 0), (1, 1), short).is_err());
        assert!(slide.shapes.is_empty());

        let good = ChartData::new(vec!["A".into()], vec![Series::new("S", vec![1.0])]);
        let chart = Chart::new("c", ChartKind::Pie, (0, 0), (1, 1), good).unwrap();
        slide.add_chart(chart);
        assert_eq!(slide.shapes.len(), 1);
    }

    #[test]
    fn test_all_text_collects_placeholders_and_shapes() {
        let mut slide = slide_from(1);
        slide.set_title("Title").unwrap();
        slide.add_textbox((0, 0), (914_400, 914_400), "floating");
        let texts = slide.all_text();
        assert_eq!(texts, vec!["Title".to_string(), "floating".to_string()]);
    }
}
