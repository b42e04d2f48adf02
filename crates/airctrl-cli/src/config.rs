//! CLI configuration.

use std::path::{Path, PathBuf};

use airctrl_emotion::EmotionConfig;

use crate::error::{CliError, CliResult};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Classifier and stabilizer settings
    pub emotion: EmotionConfig,
    /// Frame rate recorded when an input line carries none (default: 30)
    pub default_fps: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            emotion: EmotionConfig::default(),
            default_fps: 30.0,
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    ///
    /// `AIRCTRL_CONFIG` names a JSON config file. Individual `AIRCTRL_*`
    /// variables override the file, or the defaults when there is none.
    pub fn from_env() -> CliResult<Self> {
        let config_path = std::env::var("AIRCTRL_CONFIG").ok().map(PathBuf::from);
        Self::load(config_path.as_deref())
    }

    /// Load with an explicit config file, then apply environment overrides.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let base = match config_path {
            Some(path) => EmotionConfig::from_json_file(path)?,
            None => EmotionConfig::default(),
        };
        let emotion = base.with_env_overrides();
        emotion.validate()?;

        let default_fps: f64 = std::env::var("AIRCTRL_DEFAULT_FPS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30.0);
        if !(default_fps > 0.0 && default_fps.is_finite()) {
            return Err(CliError::config_error(format!(
                "AIRCTRL_DEFAULT_FPS must be positive, got {default_fps}"
            )));
        }

        Ok(Self {
            emotion,
            default_fps,
        })
    }
}
