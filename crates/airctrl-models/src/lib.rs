//! Shared data models for the AIRCTRL pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Face geometry from the landmark provider
//! - Facial feature signals and emotion labels
//! - Stabilizer output and sink records
//! - Gesture, context, intent and action labels

pub mod emotion;
pub mod features;
pub mod geometry;
pub mod gesture;
pub mod state;

// Re-export common types
pub use emotion::{Emotion, EmotionParseError};
pub use features::FacialFeatures;
pub use geometry::{FaceBoundingBox, Landmark};
pub use gesture::{Action, AppContext, Gesture, Intent, LabelParseError};
pub use state::{EmotionStat, EmotionState, EmotionStats, FrameRecord};
