//! Error types used across hexcoord.

use thiserror::Error;

/// Result type for hexcoord operations.
pub type HexcoordResult<T> = Result<T, HexcoordError>;

#[derive(Debug, Error)]
pub enum HexcoordError {
    /// Bad, missing or out-of-range input. Never partially applied.
    #[error("{0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Spreadsheet generation failed.
    #[error("export error: {0}")]
    Export(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HexcoordError {
    /// Whether the error was caused by caller input rather than the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, HexcoordError::Validation(_))
    }
}

// Implement From for common error types to enable `?` operator
impl From<std::io::Error> for HexcoordError {
    fn from(err: std::io::Error) -> Self {
        HexcoordError::Internal(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for HexcoordError {
    fn from(err: serde_json::Error) -> Self {
        HexcoordError::Internal(format!("JSON error: {}", err))
    }
}

impl From<String> for HexcoordError {
    fn from(err: String) -> Self {
        HexcoordError::Internal(err)
    }
}

impl From<&str> for HexcoordError {
    fn from(err: &str) -> Self {
        HexcoordError::Internal(err.to_string())
    }
}
