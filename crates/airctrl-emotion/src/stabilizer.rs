//! Temporal stabilization of per-frame emotion labels.
//!
//! Raw classifier output flickers from frame to frame. The stabilizer
//! smooths the signals with an EMA, scores confidence from recent signal
//! variance, and only lets a new label replace the current one after it
//! has persisted for a dwell period, outside a post-switch cooldown, with
//! enough confidence.
//!
//! `update` is an order-dependent state machine. Callers must deliver
//! frames sequentially from a single thread.

use airctrl_models::{Emotion, EmotionStat, EmotionState, EmotionStats, FacialFeatures};
use tracing::{debug, trace};

use crate::config::StabilizerConfig;
use crate::ema::FeatureEma;
use crate::stats;
use crate::window::BoundedWindow;

/// Frames of raw features kept for confidence scoring.
pub const VARIANCE_WINDOW: usize = 10;

/// Samples needed before confidence is computed from variance.
pub const MIN_CONFIDENCE_SAMPLES: usize = 5;

/// Confidence reported while the variance window is under-populated.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Below this confidence the raw label is treated as NEUTRAL.
pub const LOW_CONFIDENCE_FLOOR: f64 = 0.45;

const MAX_STABILITY: u32 = 10;
const STABILITY_AFTER_SWITCH: u32 = 5;

// Variance weights per signal (mouth, eye, brow, smile)
const MOUTH_VARIANCE_WEIGHT: f64 = 80.0;
const EYE_VARIANCE_WEIGHT: f64 = 40.0;
const BROW_VARIANCE_WEIGHT: f64 = 40.0;
const SMILE_VARIANCE_WEIGHT: f64 = 120.0;

/// Score how steady a run of feature samples is.
///
/// Returns `DEFAULT_CONFIDENCE` for fewer than `MIN_CONFIDENCE_SAMPLES`
/// samples, otherwise `1 / (1 + V)` where `V` is the weighted sum of the
/// per-signal population variances. Always in [0, 1].
pub fn variance_confidence<'a>(samples: impl IntoIterator<Item = &'a FacialFeatures>) -> f64 {
    let mut mouth = Vec::new();
    let mut eye = Vec::new();
    let mut brow = Vec::new();
    let mut smile = Vec::new();
    for f in samples {
        mouth.push(f.mouth_openness);
        eye.push(f.eye_openness);
        brow.push(f.eyebrow_raise);
        smile.push(f.smile_lift);
    }

    if mouth.len() < MIN_CONFIDENCE_SAMPLES {
        return DEFAULT_CONFIDENCE;
    }

    let total_variance = stats::variance(&mouth) * MOUTH_VARIANCE_WEIGHT
        + stats::variance(&eye) * EYE_VARIANCE_WEIGHT
        + stats::variance(&brow) * BROW_VARIANCE_WEIGHT
        + stats::variance(&smile) * SMILE_VARIANCE_WEIGHT;

    let confidence = 1.0 / (1.0 + total_variance);
    if confidence.is_nan() {
        // Non-finite input
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

/// A label competing to replace the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEmotion {
    pub emotion: Emotion,
    /// Consecutive frames the candidate has been seen
    pub count: u32,
}

/// Hysteretic, confidence-gated emotion tracker.
#[derive(Debug, Clone)]
pub struct TemporalStabilizer {
    config: StabilizerConfig,
    ema: FeatureEma,
    variance_window: BoundedWindow<FacialFeatures>,
    history: BoundedWindow<Emotion>,
    current_emotion: Emotion,
    stability_count: u32,
    hold_frames: u32,
    cooldown_remaining: u32,
    pending: Option<PendingEmotion>,
    frames_observed: u64,
}

impl TemporalStabilizer {
    /// Create a stabilizer. `history_size` of zero is raised to one.
    pub fn new(config: StabilizerConfig) -> Self {
        let history = BoundedWindow::new(config.history_size);
        Self {
            config,
            ema: FeatureEma::new(),
            variance_window: BoundedWindow::new(VARIANCE_WINDOW),
            history,
            current_emotion: Emotion::Neutral,
            stability_count: 0,
            hold_frames: 0,
            cooldown_remaining: 0,
            pending: None,
            frames_observed: 0,
        }
    }

    /// Feed one frame and return the stabilized state.
    pub fn update(&mut self, features: FacialFeatures, raw_emotion: Emotion) -> EmotionState {
        self.frames_observed += 1;

        let smoothed = self.ema.update(&features, self.config.smoothing_factor);
        self.variance_window.push(features);

        let confidence = variance_confidence(&self.variance_window);
        let candidate = if confidence < LOW_CONFIDENCE_FLOOR {
            if !raw_emotion.is_neutral() {
                trace!(
                    raw = %raw_emotion,
                    confidence,
                    "Low confidence, treating frame as NEUTRAL"
                );
            }
            Emotion::Neutral
        } else {
            raw_emotion
        };

        self.apply_hysteresis(candidate, confidence);
        self.history.push(self.current_emotion);

        EmotionState {
            emotion: self.current_emotion,
            confidence,
            raw_features: features,
            smoothed_features: smoothed,
        }
    }

    fn apply_hysteresis(&mut self, candidate: Emotion, confidence: f64) {
        if candidate == self.current_emotion {
            self.stability_count = (self.stability_count + 1).min(MAX_STABILITY);
            self.hold_frames = self.hold_frames.saturating_add(1);
            self.pending = None;
            self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
            return;
        }

        let pending_count = match self.pending {
            Some(p) if p.emotion == candidate => p.count.saturating_add(1),
            _ => {
                debug!(
                    current = %self.current_emotion,
                    candidate = %candidate,
                    "New emotion candidate"
                );
                1
            }
        };
        self.pending = Some(PendingEmotion {
            emotion: candidate,
            count: pending_count,
        });

        if confidence >= self.config.confidence_threshold
            && pending_count >= self.config.min_dwell_frames
            && self.cooldown_remaining == 0
        {
            debug!(
                from = %self.current_emotion,
                to = %candidate,
                confidence,
                dwell = pending_count,
                "Emotion switch committed"
            );
            self.current_emotion = candidate;
            self.stability_count = STABILITY_AFTER_SWITCH;
            self.hold_frames = 0;
            self.cooldown_remaining = self.config.cooldown_frames;
            self.pending = None;
        } else {
            self.stability_count = self.stability_count.saturating_sub(1);
        }
    }

    /// Label distribution over the history window.
    ///
    /// Every variant is listed (possibly with a zero count) once anything
    /// has been recorded; an empty history yields an empty map.
    pub fn get_stats(&self) -> EmotionStats {
        let total = self.history.len();
        if total == 0 {
            return EmotionStats::new();
        }

        Emotion::ALL
            .iter()
            .map(|&emotion| {
                let count = self.history.iter().filter(|&&e| e == emotion).count();
                let percentage = count as f64 / total as f64 * 100.0;
                (emotion, EmotionStat { count, percentage })
            })
            .collect()
    }

    /// Drop all state, as if freshly constructed.
    pub fn reset(&mut self) {
        self.ema.reset();
        self.variance_window.clear();
        self.history.clear();
        self.current_emotion = Emotion::Neutral;
        self.stability_count = 0;
        self.hold_frames = 0;
        self.cooldown_remaining = 0;
        self.pending = None;
        self.frames_observed = 0;
    }

    pub fn current_emotion(&self) -> Emotion {
        self.current_emotion
    }

    pub fn stability_count(&self) -> u32 {
        self.stability_count
    }

    pub fn hold_frames(&self) -> u32 {
        self.hold_frames
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn pending(&self) -> Option<PendingEmotion> {
        self.pending
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Frames seen since construction or the last reset.
    pub fn frames_observed(&self) -> u64 {
        self.frames_observed
    }

    /// Whether the EMA has been seeded by a first frame.
    pub fn is_seeded(&self) -> bool {
        self.ema.is_seeded()
    }

    /// Latest smoothed features, `None` before the first frame.
    pub fn smoothed_features(&self) -> Option<FacialFeatures> {
        self.ema.current()
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }
}

impl Default for TemporalStabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steady() -> FacialFeatures {
        FacialFeatures::new(0.02, 0.025, 0.0, 0.01)
    }

    /// Stabilizer with five NEUTRAL frames behind it, confidence at 1.0.
    fn warmed_up() -> TemporalStabilizer {
        let mut s = TemporalStabilizer::default();
        feed(&mut s, Emotion::Neutral, 5);
        s
    }

    fn feed(s: &mut TemporalStabilizer, emotion: Emotion, frames: usize) -> EmotionState {
        let mut last = None;
        for _ in 0..frames {
            last = Some(s.update(steady(), emotion));
        }
        last.unwrap()
    }

    #[test]
    fn test_confidence_defaults_until_five_samples() {
        let mut s = TemporalStabilizer::default();
        for i in 0..4 {
            let features = FacialFeatures::new(i as f64, 0.0, 0.0, 0.0);
            assert_eq!(s.update(features, Emotion::Neutral).confidence, 0.5);
        }
        // Fifth sample switches to the variance score
        assert!(s.update(steady(), Emotion::Neutral).confidence < DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_constant_signal_confidence_is_one() {
        let state = feed(&mut TemporalStabilizer::default(), Emotion::Neutral, 5);
        assert_eq!(state.confidence, 1.0);
    }

    #[test]
    fn test_variance_confidence_weighting() {
        // Mouth alternates 0/1: population variance 0.25, weighted 20
        let samples: Vec<FacialFeatures> = (0..10)
            .map(|i| FacialFeatures::new((i % 2) as f64, 0.0, 0.0, 0.0))
            .collect();
        assert!((variance_confidence(&samples) - 1.0 / 21.0).abs() < 1e-12);

        // Smile carries weight 120
        let samples: Vec<FacialFeatures> = (0..10)
            .map(|i| FacialFeatures::new(0.0, 0.0, 0.0, (i % 2) as f64 * 0.2))
            .collect();
        // variance 0.01 * 120 = 1.2
        assert!((variance_confidence(&samples) - 1.0 / 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_first_frame_seeds_ema() {
        let mut s = TemporalStabilizer::default();
        assert!(!s.is_seeded());

        let first = FacialFeatures::new(0.3, 0.02, -0.01, 0.005);
        let state = s.update(first, Emotion::Neutral);
        assert_eq!(state.smoothed_features, first);
        assert_eq!(state.raw_features, first);
        assert!(s.is_seeded());
        assert_eq!(s.smoothed_features(), Some(first));

        let state = s.update(FacialFeatures::new(1.3, 0.02, -0.01, 0.005), Emotion::Neutral);
        assert!((state.smoothed_features.mouth_openness - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_short_candidate_run_does_not_switch() {
        let mut s = warmed_up();

        let state = feed(&mut s, Emotion::Happy, 3);
        assert_eq!(state.emotion, Emotion::Neutral);
        assert_eq!(
            s.pending(),
            Some(PendingEmotion {
                emotion: Emotion::Happy,
                count: 3
            })
        );

        feed(&mut s, Emotion::Neutral, 1);
        assert_eq!(s.pending(), None);

        let state = feed(&mut s, Emotion::Happy, 3);
        assert_eq!(state.emotion, Emotion::Neutral);
    }

    #[test]
    fn test_alternating_candidates_restart_dwell() {
        let mut s = warmed_up();
        for _ in 0..5 {
            feed(&mut s, Emotion::Happy, 2);
            feed(&mut s, Emotion::Sad, 2);
        }
        assert_eq!(s.current_emotion(), Emotion::Neutral);
    }

    #[test]
    fn test_dwell_commits_single_switch() {
        let mut s = warmed_up();

        feed(&mut s, Emotion::Happy, 3);
        assert_eq!(s.current_emotion(), Emotion::Neutral);

        let state = s.update(steady(), Emotion::Happy);
        assert_eq!(state.emotion, Emotion::Happy);
        assert_eq!(s.stability_count(), 5);
        assert_eq!(s.hold_frames(), 0);
        assert_eq!(s.cooldown_remaining(), 6);
        assert_eq!(s.pending(), None);
    }

    #[test]
    fn test_cooldown_blocks_second_switch() {
        let mut s = warmed_up();
        feed(&mut s, Emotion::Happy, 4);
        assert_eq!(s.current_emotion(), Emotion::Happy);

        // A qualifying candidate during cooldown never commits
        let state = feed(&mut s, Emotion::Sad, 10);
        assert_eq!(state.emotion, Emotion::Happy);
        assert_eq!(s.cooldown_remaining(), 6);

        // Agreeing frames drain the cooldown
        feed(&mut s, Emotion::Happy, 6);
        assert_eq!(s.cooldown_remaining(), 0);

        feed(&mut s, Emotion::Sad, 3);
        assert_eq!(s.current_emotion(), Emotion::Happy);
        feed(&mut s, Emotion::Sad, 1);
        assert_eq!(s.current_emotion(), Emotion::Sad);
    }

    #[test]
    fn test_no_switch_below_confidence_threshold() {
        // Frames 1-4 report 0.5, under the 0.6 gate
        let mut s = TemporalStabilizer::default();
        let state = feed(&mut s, Emotion::Angry, 4);
        assert_eq!(state.emotion, Emotion::Neutral);
        assert_eq!(s.pending().map(|p| p.count), Some(4));

        // Frame 5 reaches full confidence and commits
        let state = s.update(steady(), Emotion::Angry);
        assert_eq!(state.emotion, Emotion::Angry);
    }

    #[test]
    fn test_jittery_signal_forces_neutral() {
        let mut s = TemporalStabilizer::default();
        for i in 0..20 {
            let features = FacialFeatures::new((i % 2) as f64, 0.02, 0.0, 0.0);
            let state = s.update(features, Emotion::Happy);
            assert_eq!(state.emotion, Emotion::Neutral);
            if i >= 4 {
                assert!(state.confidence < LOW_CONFIDENCE_FLOOR);
            }
        }
        assert_eq!(s.pending(), None);
    }

    #[test]
    fn test_stability_count_bounds() {
        let mut s = TemporalStabilizer::default();
        feed(&mut s, Emotion::Neutral, 25);
        assert_eq!(s.stability_count(), 10);
        assert_eq!(s.hold_frames(), 25);

        feed(&mut s, Emotion::Fear, 3);
        assert_eq!(s.stability_count(), 7);

        let mut fresh = TemporalStabilizer::default();
        feed(&mut fresh, Emotion::Sad, 2);
        assert_eq!(fresh.stability_count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let config = StabilizerConfig {
            history_size: 8,
            ..Default::default()
        };
        let mut s = TemporalStabilizer::new(config);
        feed(&mut s, Emotion::Neutral, 30);
        assert_eq!(s.history_len(), 8);
        assert_eq!(s.frames_observed(), 30);
    }

    #[test]
    fn test_stats() {
        let mut s = TemporalStabilizer::default();
        assert!(s.get_stats().is_empty());

        feed(&mut s, Emotion::Neutral, 5);
        feed(&mut s, Emotion::Happy, 5);

        let stats = s.get_stats();
        assert_eq!(stats.len(), Emotion::ALL.len());
        // Switch commits on the fourth HAPPY frame
        assert_eq!(stats[&Emotion::Neutral].count, 8);
        assert_eq!(stats[&Emotion::Happy].count, 2);
        assert_eq!(stats[&Emotion::Sad].count, 0);
        assert!((stats[&Emotion::Happy].percentage - 20.0).abs() < 1e-9);

        let total: f64 = stats.values().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut s = warmed_up();
        feed(&mut s, Emotion::Surprised, 4);
        assert_eq!(s.current_emotion(), Emotion::Surprised);

        s.reset();
        assert_eq!(s.current_emotion(), Emotion::Neutral);
        assert_eq!(s.cooldown_remaining(), 0);
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.frames_observed(), 0);
        assert!(!s.is_seeded());
        assert_eq!(s.smoothed_features(), None);
        assert!(s.get_stats().is_empty());

        let raw = FacialFeatures::new(0.9, 0.01, 0.03, 0.0);
        let state = s.update(raw, Emotion::Angry);
        assert_eq!(state.smoothed_features, raw);
        assert_eq!(state.emotion, Emotion::Neutral);
        assert_eq!(state.confidence, 0.5);
    }
}
