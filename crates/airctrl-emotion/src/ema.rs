//! Exponential moving averages with an explicit seeding state.

use airctrl_models::FacialFeatures;

/// One EMA accumulator.
///
/// The first sample seeds the accumulator and is returned unchanged; only
/// later samples are blended. A seeded accumulator stays seeded until it is
/// explicitly reset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ema {
    #[default]
    Unseeded,
    Seeded(f64),
}

impl Ema {
    /// Feed a sample and return the new average.
    ///
    /// `ema = alpha * sample + (1 - alpha) * ema_prev`
    pub fn update(&mut self, sample: f64, alpha: f64) -> f64 {
        let next = match *self {
            Ema::Unseeded => sample,
            Ema::Seeded(prev) => alpha * sample + (1.0 - alpha) * prev,
        };
        *self = Ema::Seeded(next);
        next
    }

    /// Current average, if seeded.
    pub fn value(&self) -> Option<f64> {
        match self {
            Ema::Unseeded => None,
            Ema::Seeded(v) => Some(*v),
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Ema::Seeded(_))
    }

    pub fn reset(&mut self) {
        *self = Ema::Unseeded;
    }
}

/// Four accumulators, one per facial signal.
///
/// All four are seeded on the same frame, so they are either all unseeded
/// or all seeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEma {
    mouth: Ema,
    eye: Ema,
    brow: Ema,
    smile: Ema,
}

impl FeatureEma {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blend a new frame into the averages and return the smoothed features.
    pub fn update(&mut self, features: &FacialFeatures, alpha: f64) -> FacialFeatures {
        FacialFeatures {
            mouth_openness: self.mouth.update(features.mouth_openness, alpha),
            eye_openness: self.eye.update(features.eye_openness, alpha),
            eyebrow_raise: self.brow.update(features.eyebrow_raise, alpha),
            smile_lift: self.smile.update(features.smile_lift, alpha),
        }
    }

    /// Smoothed features, if any frame has been observed.
    pub fn current(&self) -> Option<FacialFeatures> {
        Some(FacialFeatures {
            mouth_openness: self.mouth.value()?,
            eye_openness: self.eye.value()?,
            eyebrow_raise: self.brow.value()?,
            smile_lift: self.smile.value()?,
        })
    }

    pub fn is_seeded(&self) -> bool {
        self.mouth.is_seeded()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_seeds_without_blending() {
        let mut ema = Ema::default();
        assert!(!ema.is_seeded());
        assert_eq!(ema.update(0.1, 0.3), 0.1);
        assert_eq!(ema.value(), Some(0.1));
    }

    #[test]
    fn test_blend() {
        let mut ema = Ema::Seeded(1.0);
        let v = ema.update(0.0, 0.3);
        assert!((v - 0.7).abs() < 1e-12);

        let v = ema.update(0.0, 0.3);
        assert!((v - 0.49).abs() < 1e-12);
    }

    #[test]
    fn test_reset_unseeds() {
        let mut ema = Ema::Seeded(0.5);
        ema.reset();
        assert_eq!(ema, Ema::Unseeded);
        assert_eq!(ema.value(), None);
    }

    #[test]
    fn test_feature_ema_seeds_all_signals() {
        let mut ema = FeatureEma::new();
        assert!(ema.current().is_none());

        let first = FacialFeatures::new(0.03, 0.025, -0.004, 0.01);
        assert_eq!(ema.update(&first, 0.3), first);
        assert!(ema.is_seeded());

        let second = FacialFeatures::new(0.13, 0.025, 0.006, 0.01);
        let smoothed = ema.update(&second, 0.5);
        assert!((smoothed.mouth_openness - 0.08).abs() < 1e-12);
        assert!((smoothed.eyebrow_raise - 0.001).abs() < 1e-12);
        assert_eq!(ema.current(), Some(smoothed));

        ema.reset();
        assert!(!ema.is_seeded());
    }
}
