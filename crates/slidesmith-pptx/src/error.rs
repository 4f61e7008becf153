//! Error types for presentation editing and PPTX persistence.

use thiserror::Error;

/// Result type for deck operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors that can occur while editing or persisting a presentation
#[derive(Error, Debug)]
pub enum DeckError {
    /// Input file or resource not found
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// File exists but is not a well-formed PPTX container
    #[error("Invalid presentation file: {reason}")]
    InvalidFormat { reason: String },

    /// Slide layout index outside the available catalog
    #[error("Layout index {index} is out of range, available layouts: 0-{max}")]
    LayoutOutOfRange { index: usize, max: usize },

    /// Slide index outside the presentation
    #[error("Slide index {index} is out of range, presentation has {count} slides")]
    SlideOutOfRange { index: usize, count: usize },

    /// Table cell reference outside the table grid
    #[error("Cell ({row}, {col}) is out of range for a {rows}x{cols} table")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The slide's layout defines no title placeholder
    #[error("No title placeholder in layout '{layout}'")]
    NoTitlePlaceholder { layout: String },

    /// Referenced placeholder index absent on the slide
    #[error("Placeholder with index {idx} not found on slide")]
    PlaceholderNotFound { idx: u32 },

    /// Keyword outside a fixed enumerated vocabulary
    #[error("Invalid {what}: '{value}'. Accepted values are: {accepted}")]
    InvalidEnumValue {
        what: &'static str,
        value: String,
        accepted: String,
    },

    /// Table dimensions must both be positive
    #[error("Invalid table dimensions: {rows}x{cols}, rows and columns must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Chart input rejected before any shape was created
    #[error("Invalid chart data: {reason}")]
    InvalidChartData { reason: String },

    /// Encoded payload could not be decoded (base64 or image bytes)
    #[error("Decode failure: {reason}")]
    DecodeFailure { reason: String },

    /// Target path is not writable
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// Persistence failed for a reason other than permissions
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl DeckError {
    /// Create a not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid format error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create a layout out of range error from the catalog size
    pub fn layout_out_of_range(index: usize, count: usize) -> Self {
        Self::LayoutOutOfRange {
            index,
            max: count.saturating_sub(1),
        }
    }

    /// Create a slide out of range error
    pub fn slide_out_of_range(index: usize, count: usize) -> Self {
        Self::SlideOutOfRange { index, count }
    }

    /// Create a no title placeholder error
    pub fn no_title_placeholder(layout: impl Into<String>) -> Self {
        Self::NoTitlePlaceholder {
            layout: layout.into(),
        }
    }

    /// Create an invalid enum value error
    pub fn invalid_enum(what: &'static str, value: impl Into<String>, accepted: String) -> Self {
        Self::InvalidEnumValue {
            what,
            value: value.into(),
            accepted,
        }
    }

    /// Create an invalid chart data error
    pub fn invalid_chart_data(reason: impl Into<String>) -> Self {
        Self::InvalidChartData {
            reason: reason.into(),
        }
    }

    /// Create a decode failure error
    pub fn decode_failure(reason: impl Into<String>) -> Self {
        Self::DecodeFailure {
            reason: reason.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "DECK001",
            Self::InvalidFormat { .. } => "DECK002",
            Self::LayoutOutOfRange { .. } => "DECK003",
            Self::SlideOutOfRange { .. } => "DECK004",
            Self::CellOutOfRange { .. } => "DECK005",
            Self::NoTitlePlaceholder { .. } => "DECK006",
            Self::PlaceholderNotFound { .. } => "DECK007",
            Self::InvalidEnumValue { .. } => "DECK008",
            Self::InvalidDimensions { .. } => "DECK009",
            Self::InvalidChartData { .. } => "DECK010",
            Self::DecodeFailure { .. } => "DECK011",
            Self::PermissionDenied { .. } => "DECK012",
            Self::WriteFailure { .. } => "DECK013",
            Self::Io(_) => "DECK014",
            Self::Xml(_) => "DECK015",
            Self::Zip(_) => "DECK016",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DeckError::not_found("deck.pptx");
        assert_eq!(err.code(), "DECK001");
        assert!(err.to_string().contains("deck.pptx"));

        let err = DeckError::layout_out_of_range(9, 9);
        assert_eq!(err.code(), "DECK003");
        assert!(err.to_string().contains("0-8"));
    }

    #[test]
    fn test_error_display() {
        let err = DeckError::no_title_placeholder("Blank");
        assert!(err.to_string().contains("Blank"));

        let err = DeckError::PlaceholderNotFound { idx: 7 };
        assert!(err.to_string().contains('7'));

        let err = DeckError::InvalidDimensions { rows: 0, cols: 3 };
        assert!(err.to_string().contains("0x3"));
    }

    #[test]
    fn test_invalid_enum_lists_vocabulary() {
        let err = DeckError::invalid_enum("alignment", "sideways", "center, left, right".into());
        let msg = err.to_string();
        assert!(msg.contains("sideways"));
        assert!(msg.contains("center, left, right"));
    }
}
