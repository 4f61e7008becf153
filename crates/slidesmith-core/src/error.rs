//! Generation pipeline errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use slidesmith_pptx::DeckError;

/// Errors produced while loading inputs or rendering a deck.
#[derive(Debug, Error)]
pub enum GenError {
    /// An input file does not exist.
    #[error("input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// An input file exists but does not parse as JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The content document is structurally unusable.
    #[error("invalid content: {reason}")]
    InvalidContent { reason: String },

    /// A document operation failed.
    #[error(transparent)]
    Deck(#[from] DeckError),

    /// Filesystem failure outside the document container.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl GenError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn invalid_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_content(reason: impl Into<String>) -> Self {
        Self::InvalidContent {
            reason: reason.into(),
        }
    }

    /// Stable error code for logs and machine consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "GEN001",
            Self::InvalidFormat { .. } => "GEN002",
            Self::InvalidContent { .. } => "GEN003",
            Self::Deck(_) => "GEN004",
            Self::Io(_) => "GEN005",
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
