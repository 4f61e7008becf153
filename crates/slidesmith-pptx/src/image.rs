//! Embedded raster images.
//!
//! Pictures arrive either from disk or as base64 payloads. The bytes are
//! probed up front so a corrupt or unsupported payload is rejected before
//! it reaches a slide. PNG and JPEG are the accepted formats.

use crate::constants::EMU_PER_PIXEL;
use crate::error::{DeckError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io::Cursor;
use std::path::Path;

/// Raster format of an embedded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
}

impl PictureFormat {
    /// MIME content type for `[Content_Types].xml`
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension used for the media part name
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// A picture anchored on a slide
#[derive(Debug, Clone)]
pub struct Picture {
    /// Shape display name
    pub name: String,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Rendered size (width, height) in EMU
    pub size: (i64, i64),

    /// Intrinsic pixel width
    pub width_px: u32,

    /// Intrinsic pixel height
    pub height_px: u32,

    /// Raster format
    pub format: PictureFormat,

    /// Encoded image bytes, written verbatim into the media part
    pub data: Vec<u8>,
}

impl Picture {
    /// Load a picture from disk
    pub fn from_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeckError::not_found(path.display().to_string())
            } else {
                DeckError::Io(e)
            }
        })?;
        Self::from_bytes(name, bytes)
    }

    /// Decode a picture from a base64 payload
    pub fn from_base64(name: impl Into<String>, encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| DeckError::decode_failure(format!("invalid base64 image data: {e}")))?;
        Self::from_bytes(name, bytes)
    }

    /// Probe raw bytes for format and pixel dimensions
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let format = match image::guess_format(&bytes) {
            Ok(image::ImageFormat::Png) => PictureFormat::Png,
            Ok(image::ImageFormat::Jpeg) => PictureFormat::Jpeg,
            Ok(other) => {
                return Err(DeckError::decode_failure(format!(
                    "unsupported image format {other:?}, only png and jpeg are accepted"
                )))
            }
            Err(_) => {
                return Err(DeckError::decode_failure(
                    "could not determine image format from data",
                ))
            }
        };

        let (width_px, height_px) = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(DeckError::Io)?
            .into_dimensions()
            .map_err(|e| DeckError::decode_failure(format!("cannot read image header: {e}")))?;

        let size = (
            width_px as i64 * EMU_PER_PIXEL,
            height_px as i64 * EMU_PER_PIXEL,
        );
        Ok(Self {
            name: name.into(),
            position: (0, 0),
            size,
            width_px,
            height_px,
            format,
            data: bytes,
        })
    }

    /// Intrinsic size in EMU, assuming 96 DPI
    pub fn natural_size(&self) -> (i64, i64) {
        (
            self.width_px as i64 * EMU_PER_PIXEL,
            self.height_px as i64 * EMU_PER_PIXEL,
        )
    }

    /// Anchor the picture at a position with an optional explicit size.
    ///
    /// When only one dimension is given, the other is derived from the
    /// intrinsic aspect ratio. When neither is given, the picture keeps
    /// its natural 96 DPI size.
    pub fn place(&mut self, position: (i64, i64), width: Option<i64>, height: Option<i64>) {
        self.position = position;
        let (natural_w, natural_h) = self.natural_size();
        self.size = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w * natural_h / natural_w.max(1)),
            (None, Some(h)) => (h * natural_w / natural_h.max(1), h),
            (None, None) => (natural_w, natural_h),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::emu_from_inches;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_from_bytes_probes_dimensions() {
        let pic = Picture::from_bytes("Picture 1", png_bytes(4, 2)).unwrap();
        assert_eq!(pic.format, PictureFormat::Png);
        assert_eq!((pic.width_px, pic.height_px), (4, 2));
        assert_eq!(pic.size, (4 * EMU_PER_PIXEL, 2 * EMU_PER_PIXEL));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Picture::from_file("Picture 1", "/nonexistent/cat.png").unwrap_err();
        assert!(matches!(err, DeckError::NotFound { .. }));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        std::fs::write(&path, png_bytes(1, 1)).unwrap();

        let pic = Picture::from_file("Picture 1", &path).unwrap();
        assert_eq!((pic.width_px, pic.height_px), (1, 1));
    }

    #[test]
    fn test_from_base64() {
        let encoded = BASE64.encode(png_bytes(2, 2));
        let pic = Picture::from_base64("Picture 1", &encoded).unwrap();
        assert_eq!(pic.width_px, 2);

        let err = Picture::from_base64("Picture 1", "not!!base64").unwrap_err();
        assert!(matches!(err, DeckError::DecodeFailure { .. }));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = Picture::from_bytes("Picture 1", vec![0u8; 32]).unwrap_err();
        assert!(matches!(err, DeckError::DecodeFailure { .. }));
    }

    #[test]
    fn test_place_keeps_aspect_ratio() {
        let mut pic = Picture::from_bytes("Picture 1", png_bytes(4, 2)).unwrap();

        pic.place((0, 0), Some(emu_from_inches(2.0)), None);
        assert_eq!(pic.size, (emu_from_inches(2.0), emu_from_inches(1.0)));

        pic.place((0, 0), None, Some(emu_from_inches(3.0)));
        assert_eq!(pic.size, (emu_from_inches(6.0), emu_from_inches(3.0)));

        pic.place((914_400, 914_400), None, None);
        assert_eq!(pic.size, pic.natural_size());
        assert_eq!(pic.position, (914_400, 914_400));
    }
}
