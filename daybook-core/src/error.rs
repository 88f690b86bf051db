//! Error types for daybook.

use thiserror::Error;

/// Errors that can occur in daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed date key '{0}'. Expected YYYY-MM-DD")]
    MalformedKey(String),

    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DaybookError {
    fn from(e: serde_json::Error) -> Self {
        DaybookError::Serialization(e.to_string())
    }
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
