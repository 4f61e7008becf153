//! The in-memory presentation document.
//!
//! A [`Presentation`] owns its layout catalog, its slides, and the core
//! document properties. Saving and loading delegate to the [`crate::writer`]
//! and [`crate::reader`] modules; everything here stays in memory.

use crate::constants::{SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
use crate::error::{DeckError, Result};
use crate::layout::{builtin_layouts, SlideLayout};
use crate::reader::read_pptx;
use crate::slide::Slide;
use crate::writer::PptxWriter;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io::Cursor;
use std::path::Path;

/// Core document properties written into `docProps/core.xml`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreProperties {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author, also used as last-modified-by
    pub author: Option<String>,

    /// Document keywords
    pub keywords: Option<String>,

    /// Free-form comments
    pub comments: Option<String>,
}

/// An in-memory slide deck
#[derive(Debug, Clone)]
pub struct Presentation {
    /// Slide width in EMU
    pub slide_width: i64,

    /// Slide height in EMU
    pub slide_height: i64,

    /// Available slide layouts
    layouts: Vec<SlideLayout>,

    /// Slides in presentation order
    slides: Vec<Slide>,

    /// Core document properties
    pub core: CoreProperties,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    /// Create an empty widescreen deck with the built-in layout catalog
    pub fn new() -> Self {
        Self {
            slide_width: SLIDE_WIDTH_EMU,
            slide_height: SLIDE_HEIGHT_EMU,
            layouts: builtin_layouts(),
            slides: Vec::new(),
            core: CoreProperties::default(),
        }
    }

    /// The layout catalog
    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    /// Look up a layout by index
    pub fn layout(&self, index: usize) -> Result<&SlideLayout> {
        self.layouts
            .get(index)
            .ok_or_else(|| DeckError::layout_out_of_range(index, self.layouts.len()))
    }

    /// Append a slide created from the given layout, returning its index
    pub fn add_slide(&mut self, layout_index: usize) -> Result<usize> {
        let layout = self.layout(layout_index)?;
        let slide = Slide::from_layout(layout);
        self.slides.push(slide);
        Ok(self.slides.len() - 1)
    }

    /// Slides in presentation order
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Look up a slide by index
    pub fn slide(&self, index: usize) -> Result<&Slide> {
        let count = self.slides.len();
        self.slides
            .get(index)
            .ok_or(DeckError::SlideOutOfRange { index, count })
    }

    /// Look up a slide by index, mutably
    pub fn slide_mut(&mut self, index: usize) -> Result<&mut Slide> {
        let count = self.slides.len();
        self.slides
            .get_mut(index)
            .ok_or(DeckError::SlideOutOfRange { index, count })
    }

    /// Replace the core document properties
    pub fn set_core_properties(&mut self, core: CoreProperties) {
        self.core = core;
    }

    /// Append an already-built slide, used when loading an archive
    pub(crate) fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Serialize the deck to a `.pptx` file.
    ///
    /// Missing parent directories are created. Failures to create or
    /// write the file are reported with the offending path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
            }
        }
        let file = std::fs::File::create(path).map_err(|e| write_error(path, e))?;
        PptxWriter::new(file).write(self)?;
        Ok(())
    }

    /// Serialize the deck to an in-memory `.pptx` archive
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cursor = PptxWriter::new(Cursor::new(Vec::new())).write(self)?;
        Ok(cursor.into_inner())
    }

    /// Serialize the deck and base64-encode the archive
    pub fn to_base64(&self) -> Result<String> {
        Ok(BASE64.encode(self.to_bytes()?))
    }

    /// Load a deck from a `.pptx` file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeckError::not_found(path.display().to_string())
            } else {
                DeckError::Io(e)
            }
        })?;
        Self::from_bytes(&bytes)
    }

    /// Load a deck from an in-memory `.pptx` archive
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        read_pptx(Cursor::new(bytes))
    }

    /// Load a deck from a base64-encoded `.pptx` archive
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| DeckError::decode_failure(format!("invalid base64 archive: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

fn write_error(path: &Path, source: std::io::Error) -> DeckError {
    if source.kind() == std::io::ErrorKind::PermissionDenied {
        DeckError::PermissionDenied {
            path: path.display().to_string(),
        }
    } else {
        DeckError::WriteFailure {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_presentation_is_widescreen() {
        let pres = Presentation::new();
        assert_eq!(pres.slide_width, 12_192_000);
        assert_eq!(pres.slide_height, 6_858_000);
        assert_eq!(pres.layouts().len(), 9);
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_add_slide_checks_layout_range() {
        let mut pres = Presentation::new();
        let index = pres.add_slide(0).unwrap();
        assert_eq!(index, 0);
        assert_eq!(pres.slide_count(), 1);

        let err = pres.add_slide(42).unwrap_err();
        assert!(matches!(err, DeckError::LayoutOutOfRange { index: 42, max: 8 }));
        assert!(err.to_string().contains("0-8"));
    }

    #[test]
    fn test_slide_lookup_out_of_range() {
        let mut pres = Presentation::new();
        pres.add_slide(1).unwrap();

        assert!(pres.slide(0).is_ok());
        let err = pres.slide(3).unwrap_err();
        assert!(matches!(err, DeckError::SlideOutOfRange { index: 3, count: 1 }));
    }

    #[test]
    fn test_core_properties() {
        let mut pres = Presentation::new();
        pres.set_core_properties(CoreProperties {
            title: Some("Deck".into()),
            author: Some("slidesmith".into()),
            ..CoreProperties::default()
        });
        assert_eq!(pres.core.title.as_deref(), Some("Deck"));
        assert!(pres.core.subject.is_none());
    }
}
