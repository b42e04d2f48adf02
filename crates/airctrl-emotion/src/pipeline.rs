//! Per-frame processing: extract, classify, stabilize.

use airctrl_models::{EmotionState, EmotionStats, FaceBoundingBox, FacialFeatures, Landmark};
use tracing::{trace, warn};

use crate::classifier::EmotionClassifier;
use crate::config::EmotionConfig;
use crate::error::EmotionResult;
use crate::extractor::FeatureExtractor;
use crate::metrics;
use crate::stabilizer::TemporalStabilizer;

/// Owns one face's extractor, classifier and stabilizer.
///
/// Not thread-safe by construction: `process` mutates the stabilizer and
/// must be called in frame order.
#[derive(Debug, Clone)]
pub struct EmotionPipeline {
    extractor: FeatureExtractor,
    classifier: EmotionClassifier,
    stabilizer: TemporalStabilizer,
}

impl EmotionPipeline {
    /// Build a pipeline from a configuration.
    pub fn new(config: EmotionConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(&config.thresholds),
            classifier: EmotionClassifier::new(config.thresholds),
            stabilizer: TemporalStabilizer::new(config.stabilizer),
        }
    }

    /// Process one frame of landmarks.
    ///
    /// A frame the extractor rejects is reported as an error and leaves the
    /// stabilizer untouched.
    pub fn process(&mut self, landmarks: &[Landmark], bbox: &FaceBoundingBox) -> EmotionResult<EmotionState> {
        let features = match self.extractor.extract(landmarks, bbox) {
            Ok(features) => features,
            Err(e) => {
                warn!(error = %e, "Rejected frame");
                metrics::record_rejected_frame();
                return Err(e);
            }
        };
        Ok(self.process_features(features))
    }

    /// Process one frame of precomputed features.
    pub fn process_features(&mut self, features: FacialFeatures) -> EmotionState {
        let previous = self.stabilizer.current_emotion();
        let rule = self.classifier.evaluate(&features);
        let raw = rule.emotion();
        trace!(rule = rule.as_str(), raw = %raw, "Classified frame");
        let state = self.stabilizer.update(features, raw);

        metrics::record_frame(state.confidence);
        if state.emotion != previous {
            metrics::record_switch(state.emotion);
        }
        state
    }

    pub fn stats(&self) -> EmotionStats {
        self.stabilizer.get_stats()
    }

    /// Reset temporal state. Thresholds are kept.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }

    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    pub fn stabilizer(&self) -> &TemporalStabilizer {
        &self.stabilizer
    }
}

impl Default for EmotionPipeline {
    fn default() -> Self {
        Self::new(EmotionConfig::default())
    }
}
