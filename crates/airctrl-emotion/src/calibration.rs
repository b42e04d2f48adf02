//! Offline threshold calibration.
//!
//! Summarizes recorded feature samples and proposes classifier thresholds
//! from simple statistical heuristics. No learned model is involved; the
//! output is meant for a human to review before adopting.

use airctrl_models::FacialFeatures;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierThresholds;
use crate::error::{EmotionError, EmotionResult};
use crate::stats;

/// Population statistics of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl FeatureStats {
    /// Stats over the finite values of `values`, `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let (min, max) = stats::min_max(&finite)?;
        Some(Self {
            mean: stats::mean(finite.iter().copied()),
            std: stats::std_deviation(&finite),
            min,
            max,
            count: finite.len(),
        })
    }
}

/// Per-signal statistics. A signal with no finite samples is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub mouth_openness: Option<FeatureStats>,
    pub eye_openness: Option<FeatureStats>,
    pub eyebrow_raise: Option<FeatureStats>,
    pub smile_lift: Option<FeatureStats>,
}

/// Summarize a batch of recorded features.
pub fn summarize(samples: &[FacialFeatures]) -> FeatureSummary {
    FeatureSummary {
        mouth_openness: FeatureStats::from_values(samples.iter().map(|f| f.mouth_openness)),
        eye_openness: FeatureStats::from_values(samples.iter().map(|f| f.eye_openness)),
        eyebrow_raise: FeatureStats::from_values(samples.iter().map(|f| f.eyebrow_raise)),
        smile_lift: FeatureStats::from_values(samples.iter().map(|f| f.smile_lift)),
    }
}

/// Proposed values for the thresholds calibration can estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSuggestion {
    pub happy_threshold: f64,
    pub surprised_threshold: f64,
    pub eye_surprised: f64,
    pub eye_fear: f64,
    pub brow_surprised: f64,
    pub brow_furrow_angry: f64,
}

impl CalibrationSuggestion {
    /// Overlay the suggested values onto `thresholds`, keeping the rest.
    pub fn apply_to(&self, thresholds: &ClassifierThresholds) -> ClassifierThresholds {
        ClassifierThresholds {
            happy_threshold: self.happy_threshold,
            surprised_threshold: self.surprised_threshold,
            eye_surprised: self.eye_surprised,
            eye_fear: self.eye_fear,
            brow_surprised: self.brow_surprised,
            brow_furrow_angry: self.brow_furrow_angry,
            ..thresholds.clone()
        }
    }
}

/// Suggest thresholds from a summary.
///
/// - happy: a little above mean mouth openness, to stay clear of speech
/// - surprised: near the top of the observed mouth range
/// - eye surprised / fear: upper part of the eye distribution
/// - brow surprised: one deviation above the mean
/// - brow furrow: below the mean
///
/// Fails with `InvalidInput` when mouth, eye or brow stats are missing.
pub fn suggest_thresholds(summary: &FeatureSummary) -> EmotionResult<CalibrationSuggestion> {
    let mouth = require(summary.mouth_openness, "mouth_openness")?;
    let eye = require(summary.eye_openness, "eye_openness")?;
    let brow = require(summary.eyebrow_raise, "eyebrow_raise")?;

    Ok(CalibrationSuggestion {
        happy_threshold: mouth.mean + mouth.std * 0.3,
        surprised_threshold: mouth.max * 0.9,
        eye_surprised: eye.mean + eye.std * 0.8,
        eye_fear: eye.mean + eye.std * 0.6,
        brow_surprised: brow.mean + brow.std,
        brow_furrow_angry: brow.mean - (brow.std * 0.7).abs(),
    })
}

fn require(stats: Option<FeatureStats>, name: &str) -> EmotionResult<FeatureStats> {
    stats.ok_or_else(|| EmotionError::invalid_input(format!("missing stats for {name}")))
}
