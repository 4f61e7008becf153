//! Style configuration and input loading.
//!
//! The design document is a JSON file with two sections: slide-level text
//! settings and named table styles. Every field is optional and falls back
//! to a built-in default, so an empty `{}` document is a complete
//! configuration. Loaded once per run and shared read-only from then on.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use slidesmith_pptx::table::CellFormat;
use slidesmith_pptx::text::TextFormat;
use slidesmith_pptx::{Alignment, Rgb, VerticalAnchor};

use crate::content::ContentTree;
use crate::error::{GenError, Result};

/// Top-level design document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub slide_text_settings: SlideTextSettings,
    pub table_styles: TableStyles,
}

impl DesignConfig {
    /// Parse a design document from a JSON string.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Slide-level typography and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideTextSettings {
    /// Font family for slide titles.
    #[serde(default = "default_title_font")]
    pub title_font: String,

    /// Title size in points.
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f32,

    /// Font family for body text and fallback textboxes.
    #[serde(default = "default_body_font")]
    pub body_font: String,

    /// Body size in points.
    #[serde(default = "default_body_font_size")]
    pub body_font_size: f32,

    /// Title color as an RGB triple.
    #[serde(default = "default_primary_color")]
    pub primary_color: [u8; 3],

    /// Title alignment keyword (left, center, right, justify).
    #[serde(default = "default_alignment")]
    pub alignment: String,

    /// Spacing factor applied between bullet items.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,

    /// Layout index for topic and subtopic slides.
    #[serde(default = "default_layout_index")]
    pub default_layout_index: usize,
}

fn default_title_font() -> String {
    "Pretendard".to_string()
}

fn default_title_font_size() -> f32 {
    36.0
}

fn default_body_font() -> String {
    "Pretendard".to_string()
}

fn default_body_font_size() -> f32 {
    20.0
}

fn default_primary_color() -> [u8; 3] {
    [0, 0, 0]
}

fn default_alignment() -> String {
    "center".to_string()
}

fn default_line_spacing() -> f32 {
    1.3
}

fn default_layout_index() -> usize {
    1
}

impl Default for SlideTextSettings {
    fn default() -> Self {
        Self {
            title_font: default_title_font(),
            title_font_size: default_title_font_size(),
            body_font: default_body_font(),
            body_font_size: default_body_font_size(),
            primary_color: default_primary_color(),
            alignment: default_alignment(),
            line_spacing: default_line_spacing(),
            default_layout_index: default_layout_index(),
        }
    }
}

impl SlideTextSettings {
    /// Title formatting from the configured family, size, color, and
    /// alignment keyword. An unrecognized keyword is an error here, not
    /// at load time.
    pub fn title_format(&self) -> Result<TextFormat> {
        Ok(TextFormat {
            font_name: Some(self.title_font.clone()),
            font_size_pt: Some(self.title_font_size),
            color: Some(rgb(self.primary_color)),
            alignment: Some(self.alignment.parse::<Alignment>()?),
            ..TextFormat::default()
        })
    }

    /// Body formatting; alignment varies per call site.
    pub fn body_format(&self, alignment: Alignment) -> TextFormat {
        TextFormat {
            font_name: Some(self.body_font.clone()),
            font_size_pt: Some(self.body_font_size),
            alignment: Some(alignment),
            ..TextFormat::default()
        }
    }
}

/// Named table styles. Only `default` is consulted today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyles {
    pub default: TableStyle,
}

/// Styling for generated tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStyle {
    /// Font family for every cell.
    #[serde(default = "default_table_font")]
    pub font_name: String,

    /// Header row size in points.
    #[serde(default = "default_header_font_size")]
    pub header_font_size: f32,

    #[serde(default = "default_header_font_bold")]
    pub header_font_bold: bool,

    /// Header row fill as an RGB triple.
    #[serde(default = "default_header_bg_color")]
    pub header_bg_color: [u8; 3],

    /// Data row size in points.
    #[serde(default = "default_table_body_font_size")]
    pub body_font_size: f32,

    /// Data row fill as an RGB triple.
    #[serde(default = "default_body_bg_color")]
    pub body_bg_color: [u8; 3],

    /// Border width in points. Part of the schema; the cell writer does
    /// not emit per-cell borders.
    #[serde(default = "default_border_width")]
    pub border_width: f32,

    #[serde(default = "default_border_color")]
    pub border_color: [u8; 3],

    /// Column width ratios for the term table, normalized over the
    /// table width.
    #[serde(default = "default_column_width_ratio")]
    pub column_width_ratio: Vec<f32>,
}

fn default_table_font() -> String {
    "Pretendard".to_string()
}

fn default_header_font_size() -> f32 {
    18.0
}

fn default_header_font_bold() -> bool {
    true
}

fn default_header_bg_color() -> [u8; 3] {
    [230, 240, 255]
}

fn default_table_body_font_size() -> f32 {
    16.0
}

fn default_body_bg_color() -> [u8; 3] {
    [255, 255, 255]
}

fn default_border_width() -> f32 {
    1.0
}

fn default_border_color() -> [u8; 3] {
    [200, 200, 200]
}

fn default_column_width_ratio() -> Vec<f32> {
    vec![0.3, 0.7]
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_name: default_table_font(),
            header_font_size: default_header_font_size(),
            header_font_bold: default_header_font_bold(),
            header_bg_color: default_header_bg_color(),
            body_font_size: default_table_body_font_size(),
            body_bg_color: default_body_bg_color(),
            border_width: default_border_width(),
            border_color: default_border_color(),
            column_width_ratio: default_column_width_ratio(),
        }
    }
}

impl TableStyle {
    /// Formatting for the header row: bold centered text over the header
    /// fill, anchored to the cell middle.
    pub fn header_cell_format(&self) -> CellFormat {
        CellFormat {
            font_name: Some(self.font_name.clone()),
            font_size_pt: Some(self.header_font_size),
            bold: Some(self.header_font_bold),
            bg_color: Some(rgb(self.header_bg_color)),
            alignment: Some(Alignment::Center),
            vertical: Some(VerticalAnchor::Middle),
            ..CellFormat::default()
        }
    }

    /// Formatting for data rows.
    pub fn body_cell_format(&self) -> CellFormat {
        CellFormat {
            font_name: Some(self.font_name.clone()),
            font_size_pt: Some(self.body_font_size),
            bg_color: Some(rgb(self.body_bg_color)),
            alignment: Some(Alignment::Center),
            vertical: Some(VerticalAnchor::Middle),
            ..CellFormat::default()
        }
    }
}

fn rgb(c: [u8; 3]) -> Rgb {
    Rgb::new(c[0], c[1], c[2])
}

/// Load a design document, failing with the offending path.
pub fn load_design(path: impl AsRef<Path>) -> Result<DesignConfig> {
    let path = path.as_ref();
    let raw = read_input(path)?;
    DesignConfig::parse(&raw).map_err(|e| GenError::invalid_format(path, e))
}

/// Load and classify a content document.
pub fn load_content(path: impl AsRef<Path>) -> Result<ContentTree> {
    let path = path.as_ref();
    let raw = read_input(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| GenError::invalid_format(path, e))?;
    ContentTree::from_value(&value)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GenError::not_found(path));
    }
    Ok(fs::read_to_string(path)?)
}

/// Resolve where a generated deck should land.
///
/// An explicit override is returned verbatim. Otherwise the deck lands in
/// `output/` named after the content file stem.
pub fn output_path_for(content_path: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let stem = content_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("presentation");
    PathBuf::from("output").join(format!("{stem}_generated.pptx"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_fully_defaulted() {
        let config = DesignConfig::parse("{}").unwrap();
        let text = &config.slide_text_settings;
        assert_eq!(text.title_font, "Pretendard");
        assert_eq!(text.title_font_size, 36.0);
        assert_eq!(text.body_font_size, 20.0);
        assert_eq!(text.line_spacing, 1.3);
        assert_eq!(text.default_layout_index, 1);

        let table = &config.table_styles.default;
        assert_eq!(table.header_font_size, 18.0);
        assert!(table.header_font_bold);
        assert_eq!(table.header_bg_color, [230, 240, 255]);
        assert_eq!(table.column_width_ratio, vec![0.3, 0.7]);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = DesignConfig::parse(
            r#"{
                "slide_text_settings": {
                    "body_font": "Noto Sans KR",
                    "default_layout_index": 5
                }
            }"#,
        )
        .unwrap();
        let text = &config.slide_text_settings;
        assert_eq!(text.body_font, "Noto Sans KR");
        assert_eq!(text.default_layout_index, 5);
        assert_eq!(text.title_font, "Pretendard");
        assert_eq!(text.line_spacing, 1.3);
    }

    #[test]
    fn test_title_format_uses_configured_values() {
        let mut settings = SlideTextSettings::default();
        settings.primary_color = [10, 20, 30];
        settings.alignment = "left".to_string();
        let format = settings.title_format().unwrap();
        assert_eq!(format.font_size_pt, Some(36.0));
        assert_eq!(format.color, Some(Rgb::new(10, 20, 30)));
        assert_eq!(format.alignment, Some(Alignment::Left));
        assert_eq!(format.bold, None);
    }

    #[test]
    fn test_title_format_rejects_unknown_alignment() {
        let mut settings = SlideTextSettings::default();
        settings.alignment = "middle".to_string();
        assert!(settings.title_format().is_err());
    }

    #[test]
    fn test_header_cell_format_is_bold_and_filled() {
        let style = TableStyle::default();
        let format = style.header_cell_format();
        assert_eq!(format.bold, Some(true));
        assert_eq!(format.bg_color, Some(Rgb::new(230, 240, 255)));
        assert_eq!(format.vertical, Some(VerticalAnchor::Middle));
    }

    #[test]
    fn test_output_path_defaults_to_output_directory() {
        let path = output_path_for(Path::new("data/slide_content.json"), None);
        assert_eq!(path, PathBuf::from("output/slide_content_generated.pptx"));
    }

    #[test]
    fn test_output_path_override_is_verbatim() {
        let path = output_path_for(
            Path::new("data/slide_content.json"),
            Some(Path::new("/tmp/deck.pptx")),
        );
        assert_eq!(path, PathBuf::from("/tmp/deck.pptx"));
    }
}
