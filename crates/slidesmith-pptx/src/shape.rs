//! Free-form slide shapes: textboxes and autoshapes.
//!
//! [`Shape`] is the sum of everything a slide can carry outside its
//! placeholders. The autoshape vocabulary is a fixed enumerated set; an
//! unknown keyword is rejected with the accepted set spelled out.

use crate::chart::Chart;
use crate::error::{DeckError, Result};
use crate::image::Picture;
use crate::table::Table;
use crate::text::{Rgb, TextFrame};
use std::str::FromStr;

/// Accepted autoshape keywords, sorted
pub const SHAPE_KIND_NAMES: &[&str] = &[
    "arrow",
    "cloud",
    "diamond",
    "flowchart_connector",
    "flowchart_data",
    "flowchart_decision",
    "flowchart_document",
    "flowchart_internal_storage",
    "flowchart_predefined_process",
    "flowchart_process",
    "heart",
    "heptagon",
    "hexagon",
    "isosceles_triangle",
    "lightning_bolt",
    "moon",
    "no_symbol",
    "octagon",
    "oval",
    "pentagon",
    "rectangle",
    "right_triangle",
    "rounded_rectangle",
    "smiley_face",
    "star",
    "sun",
    "triangle",
];

/// Autoshape geometry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Oval,
    Diamond,
    IsoscelesTriangle,
    RightTriangle,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
    Star,
    Arrow,
    Cloud,
    Heart,
    LightningBolt,
    Sun,
    Moon,
    SmileyFace,
    NoSymbol,
    FlowchartProcess,
    FlowchartDecision,
    FlowchartData,
    FlowchartDocument,
    FlowchartPredefinedProcess,
    FlowchartInternalStorage,
    FlowchartConnector,
}

impl ShapeKind {
    /// OOXML `prstGeom` preset name
    pub fn preset(&self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::RoundedRectangle => "roundRect",
            Self::Oval => "ellipse",
            Self::Diamond => "diamond",
            Self::IsoscelesTriangle => "triangle",
            Self::RightTriangle => "rtTriangle",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Heptagon => "heptagon",
            Self::Octagon => "octagon",
            Self::Star => "star5",
            Self::Arrow => "rightArrow",
            Self::Cloud => "cloud",
            Self::Heart => "heart",
            Self::LightningBolt => "lightningBolt",
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::SmileyFace => "smileyFace",
            Self::NoSymbol => "noSmoking",
            Self::FlowchartProcess => "flowChartProcess",
            Self::FlowchartDecision => "flowChartDecision",
            Self::FlowchartData => "flowChartInputOutput",
            Self::FlowchartDocument => "flowChartDocument",
            Self::FlowchartPredefinedProcess => "flowChartPredefinedProcess",
            Self::FlowchartInternalStorage => "flowChartInternalStorage",
            Self::FlowchartConnector => "flowChartConnector",
        }
    }

    /// Human-readable name used for shape display names
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::RoundedRectangle => "Rounded Rectangle",
            Self::Oval => "Oval",
            Self::Diamond => "Diamond",
            Self::IsoscelesTriangle => "Isosceles Triangle",
            Self::RightTriangle => "Right Triangle",
            Self::Pentagon => "Pentagon",
            Self::Hexagon => "Hexagon",
            Self::Heptagon => "Heptagon",
            Self::Octagon => "Octagon",
            Self::Star => "Star",
            Self::Arrow => "Arrow",
            Self::Cloud => "Cloud",
            Self::Heart => "Heart",
            Self::LightningBolt => "Lightning Bolt",
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::SmileyFace => "Smiley Face",
            Self::NoSymbol => "No Symbol",
            Self::FlowchartProcess => "Flowchart: Process",
            Self::FlowchartDecision => "Flowchart: Decision",
            Self::FlowchartData => "Flowchart: Data",
            Self::FlowchartDocument => "Flowchart: Document",
            Self::FlowchartPredefinedProcess => "Flowchart: Predefined Process",
            Self::FlowchartInternalStorage => "Flowchart: Internal Storage",
            Self::FlowchartConnector => "Flowchart: Connector",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "rounded_rectangle" => Ok(Self::RoundedRectangle),
            "oval" => Ok(Self::Oval),
            "diamond" => Ok(Self::Diamond),
            // "triangle" is a historical alias for the isosceles variant
            "triangle" | "isosceles_triangle" => Ok(Self::IsoscelesTriangle),
            "right_triangle" => Ok(Self::RightTriangle),
            "pentagon" => Ok(Self::Pentagon),
            "hexagon" => Ok(Self::Hexagon),
            "heptagon" => Ok(Self::Heptagon),
            "octagon" => Ok(Self::Octagon),
            "star" => Ok(Self::Star),
            "arrow" => Ok(Self::Arrow),
            "cloud" => Ok(Self::Cloud),
            "heart" => Ok(Self::Heart),
            "lightning_bolt" => Ok(Self::LightningBolt),
            "sun" => Ok(Self::Sun),
            "moon" => Ok(Self::Moon),
            "smiley_face" => Ok(Self::SmileyFace),
            "no_symbol" => Ok(Self::NoSymbol),
            "flowchart_process" => Ok(Self::FlowchartProcess),
            "flowchart_decision" => Ok(Self::FlowchartDecision),
            "flowchart_data" => Ok(Self::FlowchartData),
            "flowchart_document" => Ok(Self::FlowchartDocument),
            "flowchart_predefined_process" => Ok(Self::FlowchartPredefinedProcess),
            "flowchart_internal_storage" => Ok(Self::FlowchartInternalStorage),
            "flowchart_connector" => Ok(Self::FlowchartConnector),
            _ => Err(DeckError::invalid_enum(
                "shape type",
                s,
                SHAPE_KIND_NAMES.join(", "),
            )),
        }
    }
}

/// Formatting options for an autoshape; each field independently optional
#[derive(Debug, Clone, Default)]
pub struct ShapeFormat {
    /// Solid fill color
    pub fill_color: Option<Rgb>,

    /// Outline color
    pub line_color: Option<Rgb>,

    /// Outline width in points
    pub line_width_pt: Option<f32>,
}

/// A free-floating textbox
#[derive(Debug, Clone)]
pub struct TextBox {
    /// Shape display name
    pub name: String,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),

    /// Text content
    pub frame: TextFrame,
}

/// A preset-geometry autoshape
#[derive(Debug, Clone)]
pub struct AutoShape {
    /// Shape display name
    pub name: String,

    /// Geometry kind
    pub kind: ShapeKind,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),

    /// Text inside the shape
    pub frame: TextFrame,

    /// Solid fill color
    pub fill: Option<Rgb>,

    /// Outline color
    pub line_color: Option<Rgb>,

    /// Outline width in points
    pub line_width_pt: Option<f32>,
}

impl AutoShape {
    /// Create an unfilled autoshape
    pub fn new(
        name: impl Into<String>,
        kind: ShapeKind,
        position: (i64, i64),
        size: (i64, i64),
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            size,
            frame: TextFrame::new(),
            fill: None,
            line_color: None,
            line_width_pt: None,
        }
    }

    /// Apply formatting; absent options leave the shape untouched
    pub fn apply(&mut self, format: &ShapeFormat) {
        if let Some(fill) = format.fill_color {
            self.fill = Some(fill);
        }
        if let Some(line) = format.line_color {
            self.line_color = Some(line);
        }
        if let Some(width) = format.line_width_pt {
            self.line_width_pt = Some(width);
        }
    }
}

/// Any free-form shape a slide can carry outside its placeholders
#[derive(Debug, Clone)]
pub enum Shape {
    TextBox(TextBox),
    Auto(AutoShape),
    Table(Table),
    Picture(Picture),
    Chart(Chart),
}

impl Shape {
    /// The shape's display name
    pub fn name(&self) -> &str {
        match self {
            Self::TextBox(s) => &s.name,
            Self::Auto(s) => &s.name,
            Self::Table(t) => &t.name,
            Self::Picture(p) => &p.name,
            Self::Chart(c) => &c.name,
        }
    }

    /// The table payload, when this shape is a table
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The textbox payload, when this shape is a textbox
    pub fn as_textbox(&self) -> Option<&TextBox> {
        match self {
            Self::TextBox(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("rectangle".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert_eq!("OVAL".parse::<ShapeKind>().unwrap(), ShapeKind::Oval);
        assert_eq!(
            "flowchart_decision".parse::<ShapeKind>().unwrap(),
            ShapeKind::FlowchartDecision
        );
    }

    #[test]
    fn test_triangle_alias() {
        assert_eq!(
            "triangle".parse::<ShapeKind>().unwrap(),
            ShapeKind::IsoscelesTriangle
        );
        assert_eq!(
            "isosceles_triangle".parse::<ShapeKind>().unwrap(),
            ShapeKind::IsoscelesTriangle
        );
    }

    #[test]
    fn test_unknown_kind_lists_vocabulary() {
        let err = "hexagram".parse::<ShapeKind>().unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("hexagram"));
        assert!(msg.contains("hexagon"));
        assert!(msg.contains("flowchart_process"));
        // The whole vocabulary rides along
        for name in SHAPE_KIND_NAMES {
            assert!(msg.contains(name), "missing {name} in: {msg}");
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(ShapeKind::Oval.preset(), "ellipse");
        assert_eq!(ShapeKind::NoSymbol.preset(), "noSmoking");
        assert_eq!(ShapeKind::FlowchartData.preset(), "flowChartInputOutput");
        assert_eq!(ShapeKind::Star.preset(), "star5");
    }

    #[test]
    fn test_shape_kind_names_sorted() {
        let mut sorted = SHAPE_KIND_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, SHAPE_KIND_NAMES);
    }

    #[test]
    fn test_autoshape_format() {
        let mut shape = AutoShape::new("Oval 4", ShapeKind::Oval, (0, 0), (914_400, 914_400));
        shape.apply(&ShapeFormat {
            fill_color: Some(Rgb::new(255, 0, 0)),
            line_width_pt: Some(2.0),
            ..ShapeFormat::default()
        });

        assert_eq!(shape.fill, Some(Rgb::new(255, 0, 0)));
        assert_eq!(shape.line_width_pt, Some(2.0));
        assert!(shape.line_color.is_none());
    }
}
