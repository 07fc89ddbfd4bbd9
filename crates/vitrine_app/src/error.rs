//! Error types for vitrine_app

use thiserror::Error;
use vitrine_platform::PlatformError;

/// Errors that can occur in the Vitrine runtime
#[derive(Error, Debug)]
pub enum VitrineError {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host platform error (storage, selectors)
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for VitrineError {
    fn from(err: anyhow::Error) -> Self {
        VitrineError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for VitrineError {
    fn from(err: toml::de::Error) -> Self {
        VitrineError::Config(err.to_string())
    }
}

impl From<std::io::Error> for VitrineError {
    fn from(err: std::io::Error) -> Self {
        VitrineError::Config(err.to_string())
    }
}

/// Result type for vitrine_app operations
pub type Result<T> = std::result::Result<T, VitrineError>;
