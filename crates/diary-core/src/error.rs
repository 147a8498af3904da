//! Error types for Diary core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing messages.

use thiserror::Error;

/// Result type alias for Diary operations.
pub type Result<T> = std::result::Result<T, DiaryError>;

/// Core error type for Diary operations.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// A "latest" query was made against a diary with no records
    #[error("Diary is empty")]
    EmptyCollection,

    /// Backing file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing file exists but could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DiaryError {
    /// Whether this error means "there is nothing here yet".
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiaryError::NotFound(_))
    }
}

impl From<std::io::Error> for DiaryError {
    fn from(err: std::io::Error) -> Self {
        DiaryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DiaryError {
    fn from(err: serde_json::Error) -> Self {
        DiaryError::Parse(err.to_string())
    }
}
