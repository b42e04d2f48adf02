//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid record at {path}:{line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Emotion error: {0}")]
    Emotion(#[from] airctrl_emotion::EmotionError),

    #[error("Gesture error: {0}")]
    Gesture(#[from] airctrl_gesture::GestureError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_record(path: impl Into<PathBuf>, line: usize, msg: impl Into<String>) -> Self {
        Self::InvalidRecord {
            path: path.into(),
            line,
            message: msg.into(),
        }
    }
}
