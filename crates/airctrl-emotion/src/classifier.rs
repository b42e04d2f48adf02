//! Rule-based emotion classification.
//!
//! The classifier is an ordered guard cascade over the four geometric
//! signals: the first rule whose guard holds decides the label, and a face
//! no rule claims is NEUTRAL. Guard regions overlap, so the order encodes
//! the tie-break policy and must not be rearranged.
//!
//! 1. Micro-movement guard → NEUTRAL
//! 2. Speech guard (open mouth, no smile) → NEUTRAL
//! 3. Excited
//! 4. Happy
//! 5. Surprised
//! 6. Fear
//! 7. Angry
//! 8. Disgust
//! 9. Sad
//! 10. Fallthrough → NEUTRAL

use airctrl_models::{Emotion, FacialFeatures};

use crate::config::ClassifierThresholds;

/// The rule of the cascade that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationRule {
    MicroMovementGuard,
    SpeechGuard,
    Excited,
    Happy,
    Surprised,
    Fear,
    Angry,
    Disgust,
    Sad,
    Fallthrough,
}

impl ClassificationRule {
    /// Label produced by this rule.
    pub fn emotion(&self) -> Emotion {
        match self {
            ClassificationRule::MicroMovementGuard
            | ClassificationRule::SpeechGuard
            | ClassificationRule::Fallthrough => Emotion::Neutral,
            ClassificationRule::Excited => Emotion::Excited,
            ClassificationRule::Happy => Emotion::Happy,
            ClassificationRule::Surprised => Emotion::Surprised,
            ClassificationRule::Fear => Emotion::Fear,
            ClassificationRule::Angry => Emotion::Angry,
            ClassificationRule::Disgust => Emotion::Disgust,
            ClassificationRule::Sad => Emotion::Sad,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationRule::MicroMovementGuard => "micro_movement_guard",
            ClassificationRule::SpeechGuard => "speech_guard",
            ClassificationRule::Excited => "excited",
            ClassificationRule::Happy => "happy",
            ClassificationRule::Surprised => "surprised",
            ClassificationRule::Fear => "fear",
            ClassificationRule::Angry => "angry",
            ClassificationRule::Disgust => "disgust",
            ClassificationRule::Sad => "sad",
            ClassificationRule::Fallthrough => "fallthrough",
        }
    }
}

/// Stateless classifier; the same features always give the same label.
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier {
    thresholds: ClassifierThresholds,
}

impl EmotionClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Map features to an emotion label.
    pub fn classify(&self, features: &FacialFeatures) -> Emotion {
        self.evaluate(features).emotion()
    }

    /// Run the cascade and report which rule fired.
    pub fn evaluate(&self, f: &FacialFeatures) -> ClassificationRule {
        let t = &self.thresholds;

        // Tiny movements
        if f.mouth_openness < t.happy_threshold * 0.25
            && f.eyebrow_raise.abs() < 0.003
            && f.eye_openness < t.eye_neutral * 1.1
        {
            return ClassificationRule::MicroMovementGuard;
        }

        // Talking opens the mouth without lifting the corners
        if f.smile_lift < 0.008
            && f.mouth_openness > t.happy_threshold * 1.2
            && t.eye_neutral * 0.6 < f.eye_openness
            && f.eye_openness < t.eye_surprised
        {
            return ClassificationRule::SpeechGuard;
        }

        if f.smile_lift > 0.022
            && f.mouth_openness > t.excited_threshold * 0.95
            && f.eye_openness > t.eye_excited * 0.95
            && f.eyebrow_raise > -0.001
        {
            return ClassificationRule::Excited;
        }

        if f.smile_lift > 0.012
            && f.mouth_openness > t.happy_threshold * 1.05
            && f.eye_openness >= t.eye_neutral * 0.8
        {
            return ClassificationRule::Happy;
        }

        // Discount the part of mouth openness that comes from smiling
        let effective_mouth = f.mouth_openness - f.smile_lift * 6.0;
        if effective_mouth > t.surprised_threshold * 1.08
            && f.eye_openness > t.eye_surprised * 0.98
            && f.eyebrow_raise > t.brow_surprised * 1.12
            && f.smile_lift < 0.006
        {
            return ClassificationRule::Surprised;
        }

        if f.mouth_openness > t.fear_threshold * 1.05
            && f.eye_openness > t.eye_fear
            && f.eyebrow_raise > t.brow_fear * 1.05
            && f.smile_lift < 0.008
        {
            return ClassificationRule::Fear;
        }

        if f.eyebrow_raise < t.brow_furrow_angry && f.eye_openness < t.eye_angry {
            return ClassificationRule::Angry;
        }

        if t.happy_threshold * 0.5 < f.mouth_openness
            && f.mouth_openness < t.surprised_threshold * 0.9
            && f.eye_openness < t.eye_neutral * 0.9
            && f.eyebrow_raise < -0.002
            && f.smile_lift < 0.01
        {
            return ClassificationRule::Disgust;
        }

        if f.mouth_openness < t.happy_threshold * 0.5
            && f.eye_openness < t.eye_neutral * 1.05
            && f.eyebrow_raise > -0.004
        {
            return ClassificationRule::Sad;
        }

        ClassificationRule::Fallthrough
    }
}
