//! # slidesmith-pptx
//!
//! In-memory presentation model and PPTX persistence.
//!
//! This crate owns the document primitive layer of slidesmith: a typed model
//! of a presentation (slides, layouts, placeholders, textboxes, tables,
//! autoshapes, pictures, charts), atomic editing operations with explicit
//! failure signals, and serialization to and from the OOXML `.pptx`
//! container format.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidesmith_pptx::Presentation;
//!
//! let mut pres = Presentation::new();
//! let idx = pres.add_slide(0)?;
//! pres.slide_mut(idx)?.set_title("Quarterly Review")?;
//! pres.save("review.pptx")?;
//! ```

pub mod chart;
pub mod error;
pub mod image;
pub mod layout;
pub mod presentation;
pub mod reader;
pub mod shape;
pub mod slide;
pub mod table;
pub mod text;
pub mod writer;

// Re-exports
pub use chart::{ChartData, ChartKind, LegendPosition};
pub use error::{DeckError, Result};
pub use image::Picture;
pub use layout::{PlaceholderRole, SlideLayout};
pub use presentation::{CoreProperties, Presentation};
pub use shape::{Shape, ShapeKind};
pub use slide::{Placeholder, Slide};
pub use table::{CellFormat, Table};
pub use text::{Alignment, Rgb, TextFrame, VerticalAnchor};

/// OOXML geometry and namespace constants
pub mod constants {
    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// EMU per point
    pub const EMU_PER_POINT: i64 = 12_700;

    /// EMU per pixel at the conventional 96 DPI
    pub const EMU_PER_PIXEL: i64 = 9_525;

    /// Widescreen 16:9 slide width in EMU (13.333" width)
    pub const SLIDE_WIDTH_EMU: i64 = 12_192_000;

    /// Widescreen 16:9 slide height in EMU (7.5" height)
    pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// DrawingML chart namespace
    pub const NS_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    /// Image relationship type
    pub const REL_TYPE_IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    /// Chart relationship type
    pub const REL_TYPE_CHART: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";

    /// Convert inches to EMU
    pub fn emu_from_inches(inches: f64) -> i64 {
        (inches * EMU_PER_INCH as f64).round() as i64
    }

    /// Convert points to EMU
    pub fn emu_from_points(points: f64) -> i64 {
        (points * EMU_PER_POINT as f64).round() as i64
    }

    /// Convert pixels to EMU at 96 DPI
    pub fn emu_from_pixels(pixels: u32) -> i64 {
        pixels as i64 * EMU_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_constants() {
        assert_eq!(constants::EMU_PER_INCH, 914_400);
        assert_eq!(constants::EMU_PER_POINT, 12_700);

        // 1 inch = 72 points
        assert_eq!(constants::EMU_PER_INCH, 72 * constants::EMU_PER_POINT);

        // 1 inch = 96 pixels
        assert_eq!(constants::EMU_PER_INCH, 96 * constants::EMU_PER_PIXEL);
    }

    #[test]
    fn test_emu_conversions() {
        assert_eq!(constants::emu_from_inches(1.0), 914_400);
        assert_eq!(constants::emu_from_inches(0.5), 457_200);
        assert_eq!(constants::emu_from_points(1.0), 12_700);
        assert_eq!(constants::emu_from_pixels(96), 914_400);
    }

    #[test]
    fn test_widescreen_dimensions() {
        let aspect_ratio =
            constants::SLIDE_WIDTH_EMU as f64 / constants::SLIDE_HEIGHT_EMU as f64;

        // Should be approximately 16:9
        assert!((aspect_ratio - 16.0 / 9.0).abs() < 0.01);
    }
}
