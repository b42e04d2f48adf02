//! Geometric emotion recognition.
//!
//! This crate provides:
//! - Scale-invariant feature extraction from 478-point face meshes
//! - An ordered, rule-based emotion classifier
//! - Temporal stabilization with EMA smoothing, dwell and cooldown hysteresis
//! - Offline calibration and evaluation helpers

#![deny(unreachable_patterns)]

pub mod calibration;
pub mod classifier;
pub mod config;
pub mod ema;
pub mod error;
pub mod evaluation;
pub mod extractor;
pub mod metrics;
pub mod pipeline;
pub mod stabilizer;
pub mod stats;
pub mod window;

pub use calibration::{
    suggest_thresholds, summarize, CalibrationSuggestion, FeatureStats, FeatureSummary,
};
pub use classifier::{ClassificationRule, EmotionClassifier};
pub use config::{ClassifierThresholds, EmotionConfig, StabilizerConfig};
pub use error::{EmotionError, EmotionResult};
pub use evaluation::{evaluate, ClassMetrics, EvaluationReport};
pub use extractor::{FeatureExtractor, LANDMARK_COUNT};
pub use pipeline::EmotionPipeline;
pub use stabilizer::{variance_confidence, PendingEmotion, TemporalStabilizer};
