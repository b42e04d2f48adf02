//! Per-frame outputs of the stabilizer and the record handed to external sinks.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::emotion::Emotion;
use crate::features::FacialFeatures;

/// Stabilized emotion for one frame.
///
/// Built fresh on every update; the stabilizer keeps no reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionState {
    /// Stable (hysteresis-gated) label
    pub emotion: Emotion,
    /// Variance-derived confidence in [0, 1]
    pub confidence: f64,
    /// Features as observed this frame
    pub raw_features: FacialFeatures,
    /// EMA-smoothed features
    pub smoothed_features: FacialFeatures,
}

/// Share of one label in the stabilizer's history window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionStat {
    pub count: usize,
    /// Percentage of the window, 0..=100
    pub percentage: f64,
}

/// Label distribution over the history window. Empty when nothing was recorded.
pub type EmotionStats = BTreeMap<Emotion, EmotionStat>;

/// Plain data row for an external logging sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameRecord {
    pub timestamp: DateTime<Utc>,
    pub fps: f64,
    /// Smoothed features at this frame
    pub features: FacialFeatures,
    pub emotion: Emotion,
    pub confidence: f64,
}

impl FrameRecord {
    /// Build a record from a stabilizer output.
    pub fn new(timestamp: DateTime<Utc>, fps: f64, state: &EmotionState) -> Self {
        Self {
            timestamp,
            fps,
            features: state.smoothed_features,
            emotion: state.emotion,
            confidence: state.confidence,
        }
    }
}
