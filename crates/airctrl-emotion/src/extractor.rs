//! Geometric feature extraction from dense face-mesh landmarks.
//!
//! Works on the 478-point topology of the face landmarker (468 mesh points
//! plus 10 iris points). Every distance is divided by the face box height
//! (or width, for mouth width) so the signals are scale-invariant.
//!
//! # Landmarks used
//!
//! - 13 / 14: upper / lower lip center
//! - 61 / 291: left / right mouth corner
//! - 159 / 145: left eye top / bottom
//! - 386 / 374: right eye top / bottom
//! - 107 / 336: left / right brow center

use airctrl_models::{FaceBoundingBox, FacialFeatures, Landmark};

use crate::config::ClassifierThresholds;
use crate::error::{EmotionError, EmotionResult};

/// Landmark count of the expected mesh topology.
pub const LANDMARK_COUNT: usize = 478;

pub const MOUTH_TOP: usize = 13;
pub const MOUTH_BOTTOM: usize = 14;
pub const MOUTH_LEFT: usize = 61;
pub const MOUTH_RIGHT: usize = 291;
pub const LEFT_EYE_TOP: usize = 159;
pub const LEFT_EYE_BOTTOM: usize = 145;
pub const RIGHT_EYE_TOP: usize = 386;
pub const RIGHT_EYE_BOTTOM: usize = 374;
pub const LEFT_BROW: usize = 107;
pub const RIGHT_BROW: usize = 336;

/// Lower bound for box dimensions used as divisors.
const MIN_FACE_EXTENT: f64 = 1e-6;

// Mouth openness blend weights
const MOUTH_HEIGHT_WEIGHT: f64 = 2.5;
const SMILE_LIFT_WEIGHT: f64 = 10.0;
const MOUTH_WIDTH_WEIGHT: f64 = 0.4;

/// Derives `FacialFeatures` from one face's landmarks and bounding box.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    brow_neutral_baseline: f64,
}

impl FeatureExtractor {
    /// Create an extractor using the brow baseline from `thresholds`.
    pub fn new(thresholds: &ClassifierThresholds) -> Self {
        Self::with_brow_baseline(thresholds.brow_neutral_baseline)
    }

    /// Create an extractor with an explicit brow baseline.
    pub fn with_brow_baseline(brow_neutral_baseline: f64) -> Self {
        Self {
            brow_neutral_baseline,
        }
    }

    /// Compute the four normalized signals.
    ///
    /// Fails with `InvalidInput` when `landmarks` does not hold exactly
    /// `LANDMARK_COUNT` points, or when a coordinate used is not finite.
    pub fn extract(&self, landmarks: &[Landmark], bbox: &FaceBoundingBox) -> EmotionResult<FacialFeatures> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(EmotionError::invalid_input(format!(
                "expected {} landmarks, got {}",
                LANDMARK_COUNT,
                landmarks.len()
            )));
        }

        let face_height = bbox.height().max(MIN_FACE_EXTENT);
        let face_width = bbox.width().max(MIN_FACE_EXTENT);

        let mouth_top = landmarks[MOUTH_TOP];
        let mouth_bottom = landmarks[MOUTH_BOTTOM];
        let mouth_left = landmarks[MOUTH_LEFT];
        let mouth_right = landmarks[MOUTH_RIGHT];

        // Corner offsets below the upper lip, in image y (grows downward)
        let left_corner_lift = (mouth_left.y - mouth_top.y) / face_height;
        let right_corner_lift = (mouth_right.y - mouth_top.y) / face_height;
        let smile_lift = ((left_corner_lift + right_corner_lift) / 2.0).max(0.0);

        let mouth_height = (mouth_bottom.y - mouth_top.y).abs() / face_height;
        let mouth_width = (mouth_right.x - mouth_left.x).abs() / face_width;
        let mouth_openness = (mouth_height * MOUTH_HEIGHT_WEIGHT
            + smile_lift * SMILE_LIFT_WEIGHT
            + mouth_width * MOUTH_WIDTH_WEIGHT)
            .max(0.0);

        let left_eye_open = vertical_gap(&landmarks[LEFT_EYE_TOP], &landmarks[LEFT_EYE_BOTTOM], face_height);
        let right_eye_open = vertical_gap(&landmarks[RIGHT_EYE_TOP], &landmarks[RIGHT_EYE_BOTTOM], face_height);
        let eye_openness = (left_eye_open + right_eye_open) / 2.0;

        let left_brow_dist = vertical_gap(&landmarks[LEFT_EYE_TOP], &landmarks[LEFT_BROW], face_height);
        let right_brow_dist = vertical_gap(&landmarks[RIGHT_EYE_TOP], &landmarks[RIGHT_BROW], face_height);
        let brow_gap = (left_brow_dist + right_brow_dist) / 2.0;
        let eyebrow_raise = brow_gap - self.brow_neutral_baseline;

        let features = FacialFeatures {
            mouth_openness,
            eye_openness,
            eyebrow_raise,
            smile_lift,
        };
        if !features.is_finite() {
            return Err(EmotionError::invalid_input("non-finite landmark coordinates"));
        }
        Ok(features)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(&ClassifierThresholds::default())
    }
}

#[inline]
fn vertical_gap(a: &Landmark, b: &Landmark, face_height: f64) -> f64 {
    (a.y - b.y).abs() / face_height
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn mesh() -> Vec<Landmark> {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[MOUTH_TOP] = Landmark::new(0.50, 0.60, 0.0);
        points[MOUTH_BOTTOM] = Landmark::new(0.50, 0.64, 0.0);
        points[MOUTH_LEFT] = Landmark::new(0.40, 0.62, 0.0);
        points[MOUTH_RIGHT] = Landmark::new(0.60, 0.62, 0.0);
        points[LEFT_EYE_TOP] = Landmark::new(0.40, 0.40, 0.0);
        points[LEFT_EYE_BOTTOM] = Landmark::new(0.40, 0.42, 0.0);
        points[RIGHT_EYE_TOP] = Landmark::new(0.60, 0.40, 0.0);
        points[RIGHT_EYE_BOTTOM] = Landmark::new(0.60, 0.43, 0.0);
        points[LEFT_BROW] = Landmark::new(0.40, 0.33, 0.0);
        points[RIGHT_BROW] = Landmark::new(0.60, 0.33, 0.0);
        points
    }

    #[test]
    fn test_landmark_indices_in_topology() {
        let indices = [
            MOUTH_TOP,
            MOUTH_BOTTOM,
            MOUTH_LEFT,
            MOUTH_RIGHT,
            LEFT_EYE_TOP,
            LEFT_EYE_BOTTOM,
            RIGHT_EYE_TOP,
            RIGHT_EYE_BOTTOM,
            LEFT_BROW,
            RIGHT_BROW,
        ];
        assert!(indices.iter().all(|&i| i < LANDMARK_COUNT));
    }

    #[test]
    fn test_extract_unit_box() {
        let extractor = FeatureExtractor::default();
        let bbox = FaceBoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let f = extractor.extract(&mesh(), &bbox).unwrap();

        // height 0.04 * 2.5 + lift 0.02 * 10 + width 0.2 * 0.4
        assert!((f.smile_lift - 0.02).abs() < EPS);
        assert!((f.mouth_openness - 0.38).abs() < EPS);
        assert!((f.eye_openness - 0.025).abs() < EPS);
        // brow gap 0.07 minus baseline 0.05
        assert!((f.eyebrow_raise - 0.02).abs() < EPS);
    }

    #[test]
    fn test_extract_is_scale_normalized() {
        let extractor = FeatureExtractor::default();
        let half_height = FaceBoundingBox::new(0.0, 0.25, 1.0, 0.75);
        let f = extractor.extract(&mesh(), &half_height).unwrap();

        assert!((f.smile_lift - 0.04).abs() < EPS);
        assert!((f.eye_openness - 0.05).abs() < EPS);
        assert!((f.eyebrow_raise - 0.09).abs() < EPS);
        // height 0.08 * 2.5 + lift 0.04 * 10 + width 0.2 * 0.4
        assert!((f.mouth_openness - 0.68).abs() < EPS);
    }

    #[test]
    fn test_smile_lift_clamped_at_zero() {
        let mut points = mesh();
        points[MOUTH_LEFT].y = 0.55;
        points[MOUTH_RIGHT].y = 0.55;

        let f = FeatureExtractor::default()
            .extract(&points, &FaceBoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(f.smile_lift, 0.0);
        assert!(f.mouth_openness >= 0.0);
    }

    #[test]
    fn test_wrong_landmark_count_is_invalid_input() {
        let extractor = FeatureExtractor::default();
        let bbox = FaceBoundingBox::new(0.0, 0.0, 1.0, 1.0);

        for count in [0, 468, 479] {
            let points = vec![Landmark::default(); count];
            let err = extractor.extract(&points, &bbox).unwrap_err();
            assert!(matches!(err, EmotionError::InvalidInput(_)), "count {count}");
        }
    }

    #[test]
    fn test_nan_landmark_is_invalid_input() {
        let mut points = mesh();
        points[LEFT_EYE_TOP].y = f64::NAN;

        let err = FeatureExtractor::default()
            .extract(&points, &FaceBoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, EmotionError::InvalidInput(_)));
    }

    #[test]
    fn test_degenerate_box_does_not_divide_by_zero() {
        let extractor = FeatureExtractor::default();
        let flat = FaceBoundingBox::new(0.5, 0.5, 0.5, 0.5);
        let f = extractor.extract(&mesh(), &flat).unwrap();
        assert!(f.is_finite());
    }
}
