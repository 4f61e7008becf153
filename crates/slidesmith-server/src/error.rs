//! Dispatcher errors.

use thiserror::Error;

use slidesmith_core::GenError;
use slidesmith_pptx::DeckError;

/// Errors produced while dispatching a single operation.
///
/// These never escape the dispatcher; [`crate::dispatcher::Dispatcher`]
/// converts every one into a structured failure response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request named a presentation id that is not registered.
    #[error("unknown presentation id: {id}")]
    SessionNotFound { id: String },

    /// The operation is accepted by the protocol but has no handler yet.
    #[error("operation not implemented: {operation}")]
    NotImplemented { operation: String },

    /// A document operation failed.
    #[error(transparent)]
    Deck(#[from] DeckError),

    /// The generation pipeline failed.
    #[error(transparent)]
    Gen(#[from] GenError),
}

impl DispatchError {
    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound { id: id.into() }
    }

    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Stable error code for logs and machine consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound { .. } => "DISP001",
            Self::NotImplemented { .. } => "DISP002",
            Self::Deck(_) => "DISP003",
            Self::Gen(_) => "DISP004",
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_session() {
        let err = DispatchError::session_not_found("pres_9");
        assert_eq!(err.to_string(), "unknown presentation id: pres_9");
        assert_eq!(err.code(), "DISP001");
    }

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err = DispatchError::from(DeckError::slide_out_of_range(3, 1));
        assert!(err.to_string().contains('3'), "{err}");
        assert_eq!(err.code(), "DISP003");
    }
}
