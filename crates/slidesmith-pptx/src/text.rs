//! Text content model: frames, paragraphs, runs, and formatting.
//!
//! Every text-bearing region of a slide (placeholder, textbox, table cell)
//! holds a [`TextFrame`]. Formatting keywords coming in from the outside
//! world (alignment, vertical anchor) parse against fixed vocabularies and
//! report the accepted set on failure.

use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from components
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase hex form without a leading `#`, as OOXML expects
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// OOXML `algn` attribute value
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }

    /// Accepted keywords, sorted, for error messages
    pub fn accepted() -> String {
        "center, justify, left, right".to_string()
    }
}

impl FromStr for Alignment {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "justify" => Ok(Self::Justify),
            _ => Err(DeckError::invalid_enum("alignment", s, Self::accepted())),
        }
    }
}

/// Vertical anchoring of text within its region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
}

impl VerticalAnchor {
    /// OOXML `anchor` attribute value
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::Middle => "ctr",
            Self::Bottom => "b",
        }
    }

    /// Accepted keywords, sorted, for error messages
    pub fn accepted() -> String {
        "bottom, middle, top".to_string()
    }
}

impl FromStr for VerticalAnchor {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(DeckError::invalid_enum(
                "vertical alignment",
                s,
                Self::accepted(),
            )),
        }
    }
}

/// Character-level styling for a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    /// Font family name
    pub font: Option<String>,

    /// Font size in points
    pub size_pt: Option<f32>,

    /// Bold
    pub bold: bool,

    /// Italic
    pub italic: bool,

    /// Font color
    pub color: Option<Rgb>,
}

/// A contiguous run of identically-styled text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Character styling
    pub style: RunStyle,
}

impl Run {
    /// Create a plain run with no styling
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a styled run
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One paragraph inside a text frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Runs making up the paragraph text
    pub runs: Vec<Run>,

    /// Horizontal alignment, inherited from the layout when absent
    pub alignment: Option<Alignment>,

    /// Indent level (0 = top level)
    pub level: u8,

    /// Line spacing multiplier applied after this paragraph
    pub line_spacing: Option<f32>,
}

impl Paragraph {
    /// Create a single-run paragraph
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            ..Self::default()
        }
    }

    /// The paragraph text with runs concatenated
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Formatting options applied across a whole text frame.
///
/// Every field is independently optional; absent fields leave the existing
/// styling untouched.
#[derive(Debug, Clone, Default)]
pub struct TextFormat {
    pub font_name: Option<String>,
    pub font_size_pt: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Rgb>,
    pub alignment: Option<Alignment>,
}

/// The text content of a placeholder, textbox, or table cell
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    /// Paragraphs in order
    pub paragraphs: Vec<Paragraph>,

    /// Vertical anchoring within the region
    pub anchor: Option<VerticalAnchor>,

    /// Word wrap, on unless explicitly disabled
    pub word_wrap: bool,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            anchor: None,
            word_wrap: true,
        }
    }
}

impl TextFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame holding one plain paragraph
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::plain(text)],
            ..Self::default()
        }
    }

    /// Create a frame with one paragraph per line
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: lines.into_iter().map(Paragraph::plain).collect(),
            ..Self::default()
        }
    }

    /// Build a top-level bullet list, one paragraph per item.
    ///
    /// Line spacing is applied between items only, never after the last.
    pub fn bullet_list<I, S>(items: I, line_spacing: Option<f32>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paragraphs: Vec<Paragraph> =
            items.into_iter().map(Paragraph::plain).collect();

        if let Some(spacing) = line_spacing {
            let last = paragraphs.len().saturating_sub(1);
            for para in paragraphs.iter_mut().take(last) {
                para.line_spacing = Some(spacing);
            }
        }

        Self {
            paragraphs,
            ..Self::default()
        }
    }

    /// Replace all content with a single plain paragraph
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.paragraphs = vec![Paragraph::plain(text)];
    }

    /// Plain text with paragraphs joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the frame holds no non-empty text
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.text().is_empty())
    }

    /// Apply formatting options to every paragraph and run
    pub fn apply_format(&mut self, format: &TextFormat) {
        for para in &mut self.paragraphs {
            if format.alignment.is_some() {
                para.alignment = format.alignment;
            }
            for run in &mut para.runs {
                if let Some(font) = &format.font_name {
                    run.style.font = Some(font.clone());
                }
                if let Some(size) = format.font_size_pt {
                    run.style.size_pt = Some(size);
                }
                if let Some(bold) = format.bold {
                    run.style.bold = bold;
                }
                if let Some(italic) = format.italic {
                    run.style.italic = italic;
                }
                if let Some(color) = format.color {
                    run.style.color = Some(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::new(255, 255, 255).hex(), "FFFFFF");
        assert_eq!(Rgb::new(0, 102, 255).hex(), "0066FF");
        assert_eq!(Rgb::new(230, 240, 255).hex(), "E6F0FF");
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!("LEFT".parse::<Alignment>().unwrap(), Alignment::Left);

        let err = "sideways".parse::<Alignment>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sideways"));
        assert!(msg.contains("center, justify, left, right"));
    }

    #[test]
    fn test_vertical_anchor_parse() {
        assert_eq!(
            "middle".parse::<VerticalAnchor>().unwrap(),
            VerticalAnchor::Middle
        );

        let err = "floating".parse::<VerticalAnchor>().unwrap_err();
        assert!(err.to_string().contains("bottom, middle, top"));
    }

    #[test]
    fn test_bullet_list_spacing_between_items_only() {
        let frame = TextFrame::bullet_list(["one", "two", "three"], Some(1.3));

        assert_eq!(frame.paragraphs.len(), 3);
        assert_eq!(frame.paragraphs[0].line_spacing, Some(1.3));
        assert_eq!(frame.paragraphs[1].line_spacing, Some(1.3));
        assert_eq!(frame.paragraphs[2].line_spacing, None);
    }

    #[test]
    fn test_bullet_list_single_item_no_spacing() {
        let frame = TextFrame::bullet_list(["only"], Some(1.3));
        assert_eq!(frame.paragraphs[0].line_spacing, None);
    }

    #[test]
    fn test_frame_text_joins_paragraphs() {
        let frame = TextFrame::from_lines(["first", "second"]);
        assert_eq!(frame.text(), "first\nsecond");
        assert!(!frame.is_empty());
        assert!(TextFrame::new().is_empty());
    }

    #[test]
    fn test_apply_format_touches_only_given_fields() {
        let mut frame = TextFrame::from_text("hello");
        frame.paragraphs[0].runs[0].style.bold = true;

        frame.apply_format(&TextFormat {
            font_size_pt: Some(20.0),
            ..TextFormat::default()
        });

        let style = &frame.paragraphs[0].runs[0].style;
        assert_eq!(style.size_pt, Some(20.0));
        assert!(style.bold);
        assert!(style.font.is_none());
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut frame = TextFrame::from_lines(["a", "b", "c"]);
        frame.set_text("replaced");
        assert_eq!(frame.paragraphs.len(), 1);
        assert_eq!(frame.text(), "replaced");
    }
}
