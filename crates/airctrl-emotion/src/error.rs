//! Error types for emotion processing.

use thiserror::Error;

/// Result type for emotion operations.
pub type EmotionResult<T> = Result<T, EmotionError>;

/// Errors that can occur in the emotion pipeline.
///
/// Classification and stabilization are total; only feature extraction,
/// configuration loading and the offline tooling can fail.
#[derive(Debug, Error)]
pub enum EmotionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl EmotionError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
