//! Error types for gesture recognition and action dispatch.

use thiserror::Error;

/// Result type for gesture operations.
pub type GestureResult<T> = Result<T, GestureError>;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Emergency stop raised by an action sink.
    #[error("Fail-safe triggered: {0}")]
    FailSafe(String),

    #[error("Action execution failed: {0}")]
    Execution(String),
}

impl GestureError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn fail_safe(message: impl Into<String>) -> Self {
        Self::FailSafe(message.into())
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }
}
