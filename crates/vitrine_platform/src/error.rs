//! Platform error types

use thiserror::Error;

/// Host-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Selector could not be parsed
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector text
        selector: String,
        /// What the parser rejected
        reason: String,
    },

    /// Key-value store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Storage(err.to_string())
    }
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
