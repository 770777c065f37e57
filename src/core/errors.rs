//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for triagemap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Structurally invalid triage input (negative age, unknown sex)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prediction store errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// No stored prediction with the requested id
    #[error("Prediction {0} not found")]
    NotFound(u64),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a storage error with path context
    pub fn storage(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Storage {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a storage error wrapping the underlying I/O failure
    pub fn storage_io(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Whether the caller supplied bad input, as opposed to an internal failure.
    ///
    /// The shell maps these to a client-facing rejection.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Configuration(_) | Self::NotFound(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = Error::validation("age must be non-negative, got -1");
        assert_eq!(
            err.to_string(),
            "Validation error: age must be non-negative, got -1"
        );
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_storage_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::storage_io("Failed to open store", "/tmp/store.jsonl", io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(Error::NotFound(42).to_string(), "Prediction 42 not found");
    }
}
