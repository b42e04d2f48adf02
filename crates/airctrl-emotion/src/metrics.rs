//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder.

use ::metrics::{counter, histogram};
use airctrl_models::Emotion;

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_TOTAL: &str = "airctrl_frames_total";
    pub const FRAMES_REJECTED_TOTAL: &str = "airctrl_frames_rejected_total";
    pub const EMOTION_SWITCHES_TOTAL: &str = "airctrl_emotion_switches_total";
    pub const CONFIDENCE: &str = "airctrl_confidence";
}

/// Record a processed frame and its confidence.
pub fn record_frame(confidence: f64) {
    counter!(names::FRAMES_TOTAL).increment(1);
    histogram!(names::CONFIDENCE).record(confidence);
}

/// Record a frame the extractor refused.
pub fn record_rejected_frame() {
    counter!(names::FRAMES_REJECTED_TOTAL).increment(1);
}

/// Record a committed label switch.
pub fn record_switch(to: Emotion) {
    let labels = [("emotion", to.as_str().to_string())];
    counter!(names::EMOTION_SWITCHES_TOTAL, &labels).increment(1);
}
