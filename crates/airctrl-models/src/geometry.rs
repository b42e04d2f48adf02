//! Normalized face geometry delivered by the upstream landmark provider.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Single landmark in normalized image coordinates (roughly 0..1).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    /// Create a landmark.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned face box in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceBoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl FaceBoundingBox {
    /// Create a bounding box from its edges.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Tight box around a set of landmarks. `None` for an empty set.
    pub fn from_landmarks(points: &[Landmark]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let x_min = points.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let x_max = points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let y_min = points.iter().map(|p| p.y).fold(f64::MAX, f64::min);
        let y_max = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);

        Some(Self::new(x_min, y_min, x_max, y_max))
    }

    /// Box width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Box height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// True when the edges are finite and the box has positive extent.
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.y_min, self.x_max, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_max > self.x_min
            && self.y_max > self.y_min
    }
}
