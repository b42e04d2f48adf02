//! Finger up/down detection from 21-point hand landmarks.
//!
//! Only reports which fingers are extended; meaning is assigned later by
//! the gesture vocabulary.

use airctrl_models::Landmark;
use serde::{Deserialize, Serialize};

use crate::error::{GestureError, GestureResult};

/// Landmark count of the hand topology.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Horizontal thumb spread that counts as extended.
pub const THUMB_EXTENSION_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Detect finger states from normalized hand landmarks.
    ///
    /// The thumb is extended when its tip is far enough sideways from its
    /// MCP joint. Other fingers are extended when the tip sits above the PIP
    /// joint (smaller y, since image y grows downward).
    pub fn from_hand_landmarks(points: &[Landmark]) -> GestureResult<Self> {
        if points.len() != HAND_LANDMARK_COUNT {
            return Err(GestureError::invalid_input(format!(
                "expected {} hand landmarks, got {}",
                HAND_LANDMARK_COUNT,
                points.len()
            )));
        }

        let raised = |tip: usize, pip: usize| points[tip].y < points[pip].y;

        Ok(Self {
            thumb: (points[THUMB_TIP].x - points[THUMB_MCP].x).abs() > THUMB_EXTENSION_THRESHOLD,
            index: raised(INDEX_TIP, INDEX_PIP),
            middle: raised(MIDDLE_TIP, MIDDLE_PIP),
            ring: raised(RING_TIP, RING_PIP),
            pinky: raised(PINKY_TIP, PINKY_PIP),
        })
    }

    /// Number of extended fingers, 0..=5.
    pub fn count(&self) -> u8 {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&up| up)
            .count() as u8
    }
}
