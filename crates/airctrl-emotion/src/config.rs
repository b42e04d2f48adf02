//! Configuration for the classifier and the temporal stabilizer.
//!
//! Defaults are empirically tuned. Keep their values unless a calibration
//! run says otherwise.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{EmotionError, EmotionResult};

/// Thresholds consumed by the rule cascade and the feature extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    // === Mouth ===
    /// Mouth openness of a clear smile (default: 0.015)
    pub happy_threshold: f64,
    /// Mouth openness of a big open smile (default: 0.035)
    pub excited_threshold: f64,
    /// Mouth openness of a surprised jaw drop (default: 0.08)
    pub surprised_threshold: f64,
    /// Mouth openness of a fearful face (default: 0.05)
    pub fear_threshold: f64,

    // === Eyes ===
    /// Normal eye aperture (default: 0.025)
    pub eye_neutral: f64,
    pub eye_excited: f64,
    /// Wide eyes (default: 0.04)
    pub eye_surprised: f64,
    pub eye_fear: f64,
    /// Squint (default: 0.018)
    pub eye_angry: f64,

    // === Brows ===
    /// Typical brow-to-eye distance, subtracted to get `eyebrow_raise` (default: 0.05)
    pub brow_neutral_baseline: f64,
    pub brow_surprised: f64,
    pub brow_fear: f64,
    /// Furrow depth, negative (default: -0.01)
    pub brow_furrow_angry: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            happy_threshold: 0.015,
            excited_threshold: 0.035,
            surprised_threshold: 0.08,
            fear_threshold: 0.05,
            eye_neutral: 0.025,
            eye_excited: 0.032,
            eye_surprised: 0.04,
            eye_fear: 0.035,
            eye_angry: 0.018,
            brow_neutral_baseline: 0.05,
            brow_surprised: 0.008,
            brow_fear: 0.004,
            brow_furrow_angry: -0.01,
        }
    }
}

impl ClassifierThresholds {
    fn named(&self) -> [(&'static str, f64); 13] {
        [
            ("happy_threshold", self.happy_threshold),
            ("excited_threshold", self.excited_threshold),
            ("surprised_threshold", self.surprised_threshold),
            ("fear_threshold", self.fear_threshold),
            ("eye_neutral", self.eye_neutral),
            ("eye_excited", self.eye_excited),
            ("eye_surprised", self.eye_surprised),
            ("eye_fear", self.eye_fear),
            ("eye_angry", self.eye_angry),
            ("brow_neutral_baseline", self.brow_neutral_baseline),
            ("brow_surprised", self.brow_surprised),
            ("brow_fear", self.brow_fear),
            ("brow_furrow_angry", self.brow_furrow_angry),
        ]
    }

    /// All thresholds must be finite.
    pub fn validate(&self) -> EmotionResult<()> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(EmotionError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Read overrides from `AIRCTRL_<NAME>` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Replace each value that has a parsable `AIRCTRL_<NAME>` variable.
    pub fn with_env_overrides(self) -> Self {
        Self {
            happy_threshold: env_or("AIRCTRL_HAPPY_THRESHOLD", self.happy_threshold),
            excited_threshold: env_or("AIRCTRL_EXCITED_THRESHOLD", self.excited_threshold),
            surprised_threshold: env_or("AIRCTRL_SURPRISED_THRESHOLD", self.surprised_threshold),
            fear_threshold: env_or("AIRCTRL_FEAR_THRESHOLD", self.fear_threshold),
            eye_neutral: env_or("AIRCTRL_EYE_NEUTRAL", self.eye_neutral),
            eye_excited: env_or("AIRCTRL_EYE_EXCITED", self.eye_excited),
            eye_surprised: env_or("AIRCTRL_EYE_SURPRISED", self.eye_surprised),
            eye_fear: env_or("AIRCTRL_EYE_FEAR", self.eye_fear),
            eye_angry: env_or("AIRCTRL_EYE_ANGRY", self.eye_angry),
            brow_neutral_baseline: env_or("AIRCTRL_BROW_NEUTRAL_BASELINE", self.brow_neutral_baseline),
            brow_surprised: env_or("AIRCTRL_BROW_SURPRISED", self.brow_surprised),
            brow_fear: env_or("AIRCTRL_BROW_FEAR", self.brow_fear),
            brow_furrow_angry: env_or("AIRCTRL_BROW_FURROW_ANGRY", self.brow_furrow_angry),
        }
    }
}

/// Smoothing and hysteresis settings for `TemporalStabilizer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// EMA alpha in (0, 1); 0 = smooth, 1 = responsive (default: 0.3)
    pub smoothing_factor: f64,
    /// Number of stable labels kept for analytics (default: 100)
    pub history_size: usize,
    /// Minimum confidence to commit a label switch (default: 0.6)
    pub confidence_threshold: f64,
    /// Consecutive frames a candidate must persist (default: 4)
    pub min_dwell_frames: u32,
    /// Frames after a switch before another is allowed (default: 6)
    pub cooldown_frames: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.3,
            history_size: 100,
            confidence_threshold: 0.6,
            min_dwell_frames: 4,
            cooldown_frames: 6,
        }
    }
}

impl StabilizerConfig {
    /// Check option ranges.
    pub fn validate(&self) -> EmotionResult<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor < 1.0) {
            return Err(EmotionError::invalid_config(format!(
                "smoothing_factor must be in (0, 1), got {}",
                self.smoothing_factor
            )));
        }
        if self.history_size == 0 {
            return Err(EmotionError::invalid_config("history_size must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(EmotionError::invalid_config(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.min_dwell_frames == 0 {
            return Err(EmotionError::invalid_config("min_dwell_frames must be >= 1"));
        }
        Ok(())
    }

    /// Read overrides from the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Replace each value that has a parsable `AIRCTRL_<NAME>` variable.
    pub fn with_env_overrides(self) -> Self {
        Self {
            smoothing_factor: env_or("AIRCTRL_SMOOTHING_FACTOR", self.smoothing_factor),
            history_size: env_or("AIRCTRL_HISTORY_SIZE", self.history_size),
            confidence_threshold: env_or("AIRCTRL_CONFIDENCE_THRESHOLD", self.confidence_threshold),
            min_dwell_frames: env_or("AIRCTRL_MIN_DWELL_FRAMES", self.min_dwell_frames),
            cooldown_frames: env_or("AIRCTRL_COOLDOWN_FRAMES", self.cooldown_frames),
        }
    }
}

/// Complete configuration for an emotion session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionConfig {
    pub thresholds: ClassifierThresholds,
    pub stabilizer: StabilizerConfig,
}

impl EmotionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Layer `AIRCTRL_*` variables over both sections.
    pub fn with_env_overrides(self) -> Self {
        Self {
            thresholds: self.thresholds.with_env_overrides(),
            stabilizer: self.stabilizer.with_env_overrides(),
        }
    }

    /// Load a JSON config file. Missing sections and fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> EmotionResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both sections.
    pub fn validate(&self) -> EmotionResult<()> {
        self.thresholds.validate()?;
        self.stabilizer.validate()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
