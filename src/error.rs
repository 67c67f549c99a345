//! Error types for the yearly-tag-clean library.
//!
//! Only I/O, serialization and parameter problems are errors. Malformed
//! rows are dropped by the cleaning steps and never surface here.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    /// Whether this error came from the filesystem rather than from
    /// configuration or serialization.
    pub fn is_io(&self) -> bool {
        match self {
            CleanError::Io(_) => true,
            CleanError::Csv(e) => e.is_io_error(),
            _ => false,
        }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, CleanError>;
