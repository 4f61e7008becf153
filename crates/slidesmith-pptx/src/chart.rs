//! Category charts: data model, kind vocabulary, validation.
//!
//! Chart data is validated before it touches a slide, so a rejected chart
//! never leaves a half-mutated presentation behind.

use crate::error::{DeckError, Result};
use std::str::FromStr;

/// Accepted chart keywords, sorted
pub const CHART_KIND_NAMES: &[&str] = &[
    "area",
    "bar",
    "column",
    "doughnut",
    "line",
    "line_markers",
    "pie",
    "radar",
    "radar_markers",
    "scatter",
    "stacked_area",
    "stacked_bar",
    "stacked_column",
];

/// Chart plot kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    StackedBar,
    Column,
    StackedColumn,
    Line,
    LineMarkers,
    Pie,
    Doughnut,
    Area,
    StackedArea,
    Scatter,
    Radar,
    RadarMarkers,
}

impl ChartKind {
    /// True for the bar/column family rendered as `c:barChart`
    pub fn is_bar_family(&self) -> bool {
        matches!(
            self,
            Self::Bar | Self::StackedBar | Self::Column | Self::StackedColumn
        )
    }

    /// `c:barDir` value for the bar family
    pub fn bar_direction(&self) -> &'static str {
        match self {
            Self::Bar | Self::StackedBar => "bar",
            _ => "col",
        }
    }

    /// `c:grouping` value for bar and area families
    pub fn grouping(&self) -> &'static str {
        match self {
            Self::StackedBar | Self::StackedColumn | Self::StackedArea => "stacked",
            _ => "clustered",
        }
    }

    /// True when point markers are drawn
    pub fn has_markers(&self) -> bool {
        matches!(self, Self::LineMarkers | Self::RadarMarkers)
    }

    /// `c:radarStyle` value for the radar family
    pub fn radar_style(&self) -> &'static str {
        match self {
            Self::RadarMarkers => "marker",
            _ => "standard",
        }
    }
}

impl FromStr for ChartKind {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "stacked_bar" => Ok(Self::StackedBar),
            "column" => Ok(Self::Column),
            "stacked_column" => Ok(Self::StackedColumn),
            "line" => Ok(Self::Line),
            "line_markers" => Ok(Self::LineMarkers),
            "pie" => Ok(Self::Pie),
            "doughnut" => Ok(Self::Doughnut),
            "area" => Ok(Self::Area),
            "stacked_area" => Ok(Self::StackedArea),
            "scatter" => Ok(Self::Scatter),
            "radar" => Ok(Self::Radar),
            "radar_markers" => Ok(Self::RadarMarkers),
            _ => Err(DeckError::invalid_enum(
                "chart type",
                s,
                CHART_KIND_NAMES.join(", "),
            )),
        }
    }
}

/// Legend placement on the plot area edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Right,
    Left,
    Top,
    Bottom,
}

impl LegendPosition {
    /// `c:legendPos` value
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Self::Right => "r",
            Self::Left => "l",
            Self::Top => "t",
            Self::Bottom => "b",
        }
    }
}

impl FromStr for LegendPosition {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(DeckError::invalid_enum(
                "legend position",
                s,
                "bottom, left, right, top".to_string(),
            )),
        }
    }
}

/// One named series of numeric values
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Series name shown in the legend
    pub name: String,

    /// One value per category
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Categories plus one or more series over them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    /// Category labels along the category axis
    pub categories: Vec<String>,

    /// Series plotted over the categories
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn new(categories: Vec<String>, series: Vec<Series>) -> Self {
        Self { categories, series }
    }

    /// Check the data is plottable.
    ///
    /// Series must be present, categories must be present, and every
    /// series must carry exactly one value per category. Checked in that
    /// order so the reported failure is the first structural problem.
    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            return Err(DeckError::invalid_chart_data(
                "chart requires at least one data series",
            ));
        }
        if self.categories.is_empty() {
            return Err(DeckError::invalid_chart_data(
                "chart requires at least one category",
            ));
        }
        for series in &self.series {
            if series.values.len() != self.categories.len() {
                return Err(DeckError::invalid_chart_data(format!(
                    "series '{}' has {} values, expected {} (one per category)",
                    series.name,
                    series.values.len(),
                    self.categories.len()
                )));
            }
        }
        Ok(())
    }
}

/// Formatting options for a chart; each field independently optional
#[derive(Debug, Clone, Default)]
pub struct ChartFormat {
    /// Chart title text
    pub title: Option<String>,

    /// Show or hide the legend
    pub show_legend: Option<bool>,

    /// Legend placement; implies showing the legend
    pub legend: Option<LegendPosition>,

    /// Draw value labels on data points
    pub data_labels: Option<bool>,
}

/// A chart anchored on a slide
#[derive(Debug, Clone)]
pub struct Chart {
    /// Shape display name
    pub name: String,

    /// Plot kind
    pub kind: ChartKind,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),

    /// Categories and series
    pub data: ChartData,

    /// Chart title
    pub title: Option<String>,

    /// Legend placement; `None` hides the legend
    pub legend: Option<LegendPosition>,

    /// Draw value labels on data points
    pub data_labels: bool,
}

impl Chart {
    /// Build a chart, validating the data up front
    pub fn new(
        name: impl Into<String>,
        kind: ChartKind,
        position: (i64, i64),
        size: (i64, i64),
        data: ChartData,
    ) -> Result<Self> {
        data.validate()?;
        Ok(Self {
            name: name.into(),
            kind,
            position,
            size,
            data,
            title: None,
            legend: Some(LegendPosition::Right),
            data_labels: false,
        })
    }

    /// Apply formatting; absent options leave the chart untouched
    pub fn apply(&mut self, format: &ChartFormat) {
        if let Some(title) = &format.title {
            self.title = Some(title.clone());
        }
        if let Some(show) = format.show_legend {
            if show {
                if self.legend.is_none() {
                    self.legend = Some(LegendPosition::Right);
                }
            } else {
                self.legend = None;
            }
        }
        if let Some(position) = format.legend {
            self.legend = Some(position);
        }
        if let Some(labels) = format.data_labels {
            self.data_labels = labels;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ChartData {
        ChartData::new(
            vec!["Q1".into(), "Q2".into(), "Q3".into()],
            vec![Series::new("Revenue", vec![10.0, 12.5, 14.0])],
        )
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("column".parse::<ChartKind>().unwrap(), ChartKind::Column);
        assert_eq!(
            "stacked_area".parse::<ChartKind>().unwrap(),
            ChartKind::StackedArea
        );
        assert_eq!(
            "radar_markers".parse::<ChartKind>().unwrap(),
            ChartKind::RadarMarkers
        );
        assert_eq!("PIE".parse::<ChartKind>().unwrap(), ChartKind::Pie);
    }

    #[test]
    fn test_unknown_kind_lists_vocabulary() {
        let err = "histogram".parse::<ChartKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("histogram"));
        assert!(msg.contains("doughnut"));
        assert!(msg.contains("stacked_column"));
    }

    #[test]
    fn test_legend_positions() {
        assert_eq!(
            "bottom".parse::<LegendPosition>().unwrap(),
            LegendPosition::Bottom
        );
        assert_eq!(LegendPosition::Left.ooxml_value(), "l");
        assert!("center".parse::<LegendPosition>().is_err());
    }

    #[test]
    fn test_validate_order() {
        // No series wins over no categories
        let empty = ChartData::default();
        let msg = empty.validate().unwrap_err().to_string();
        assert!(msg.contains("series"), "got: {msg}");

        let no_categories = ChartData::new(vec![], vec![Series::new("S", vec![1.0])]);
        let msg = no_categories.validate().unwrap_err().to_string();
        assert!(msg.contains("category"), "got: {msg}");
    }

    #[test]
    fn test_validate_series_length() {
        let data = ChartData::new(
            vec!["A".into(), "B".into()],
            vec![
                Series::new("Good", vec![1.0, 2.0]),
                Series::new("Short", vec![1.0]),
            ],
        );
        let msg = data.validate().unwrap_err().to_string();
        assert!(msg.contains("Short"));
        assert!(msg.contains("expected 2"));
    }

    #[test]
    fn test_new_chart_validates() {
        let bad = ChartData::new(vec!["A".into()], vec![]);
        assert!(Chart::new("Chart 1", ChartKind::Pie, (0, 0), (1, 1), bad).is_err());

        let chart =
            Chart::new("Chart 1", ChartKind::Bar, (0, 0), (1, 1), sample_data()).unwrap();
        assert_eq!(chart.legend, Some(LegendPosition::Right));
        assert!(!chart.data_labels);
    }

    #[test]
    fn test_apply_format() {
        let mut chart =
            Chart::new("Chart 1", ChartKind::Line, (0, 0), (1, 1), sample_data()).unwrap();

        chart.apply(&ChartFormat {
            title: Some("Quarterly".into()),
            show_legend: Some(false),
            data_labels: Some(true),
            ..ChartFormat::default()
        });
        assert_eq!(chart.title.as_deref(), Some("Quarterly"));
        assert!(chart.legend.is_none());
        assert!(chart.data_labels);

        chart.apply(&ChartFormat {
            legend: Some(LegendPosition::Top),
            ..ChartFormat::default()
        });
        assert_eq!(chart.legend, Some(LegendPosition::Top));
    }

    #[test]
    fn test_bar_family_attributes() {
        assert!(ChartKind::StackedColumn.is_bar_family());
        assert!(!ChartKind::Line.is_bar_family());
        assert_eq!(ChartKind::Bar.bar_direction(), "bar");
        assert_eq!(ChartKind::StackedColumn.bar_direction(), "col");
        assert_eq!(ChartKind::StackedArea.grouping(), "stacked");
        assert_eq!(ChartKind::Column.grouping(), "clustered");
        assert!(ChartKind::LineMarkers.has_markers());
        assert!(!ChartKind::Line.has_markers());
        assert_eq!(ChartKind::RadarMarkers.radar_style(), "marker");
        assert_eq!(ChartKind::Radar.radar_style(), "standard");
    }
}
