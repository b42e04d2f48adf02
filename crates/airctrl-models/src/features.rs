//! Scale-normalized facial geometry signals.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Four geometric signals derived from one face in one frame.
///
/// All values are normalized by face height or width so they stay
/// comparable as the subject moves toward or away from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FacialFeatures {
    /// Combined vertical lip gap, smile lift and mouth width (>= 0).
    pub mouth_openness: f64,
    /// Mean vertical eye aperture of both eyes (>= 0).
    pub eye_openness: f64,
    /// Brow-to-eye distance relative to the neutral baseline; negative when furrowed.
    pub eyebrow_raise: f64,
    /// Upward displacement of the mouth corners (>= 0).
    pub smile_lift: f64,
}

impl FacialFeatures {
    /// Create a feature record.
    pub fn new(mouth_openness: f64, eye_openness: f64, eyebrow_raise: f64, smile_lift: f64) -> Self {
        Self {
            mouth_openness,
            eye_openness,
            eyebrow_raise,
            smile_lift,
        }
    }

    /// True when every signal is a finite number.
    pub fn is_finite(&self) -> bool {
        self.mouth_openness.is_finite()
            && self.eye_openness.is_finite()
            && self.eyebrow_raise.is_finite()
            && self.smile_lift.is_finite()
    }
}
