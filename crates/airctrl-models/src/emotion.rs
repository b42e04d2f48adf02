//! Emotion labels produced by the classifier and stabilizer.
//!
//! The label set is closed. Equality is what matters to the hysteresis
//! logic; the derived ordering only exists so labels can key sorted maps.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// High-level emotional state of a tracked face.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    /// Clear smile with relaxed or wide eyes.
    Happy,
    /// Closed mouth, normal eyes, brows slightly up.
    Sad,
    /// Brows down and squinting.
    Angry,
    /// Wide mouth, wide eyes, raised brows, no smile.
    Surprised,
    /// Wide eyes, moderately open mouth, raised brows.
    Fear,
    /// Moderately open mouth, lowered brows, narrowed eyes.
    Disgust,
    /// Big smile with open eyes.
    Excited,
    /// Resting face, speech, or anything the rules do not claim.
    #[default]
    Neutral,
}

impl Emotion {
    /// All emotion variants, in declaration order.
    pub const ALL: &'static [Emotion] = &[
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Excited,
        Emotion::Neutral,
    ];

    /// Returns the label as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "HAPPY",
            Emotion::Sad => "SAD",
            Emotion::Angry => "ANGRY",
            Emotion::Surprised => "SURPRISED",
            Emotion::Fear => "FEAR",
            Emotion::Disgust => "DISGUST",
            Emotion::Excited => "EXCITED",
            Emotion::Neutral => "NEUTRAL",
        }
    }

    /// Returns true for the resting label.
    pub fn is_neutral(&self) -> bool {
        matches!(self, Emotion::Neutral)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = EmotionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HAPPY" => Ok(Emotion::Happy),
            "SAD" => Ok(Emotion::Sad),
            "ANGRY" => Ok(Emotion::Angry),
            "SURPRISED" | "SURPRISE" => Ok(Emotion::Surprised),
            "FEAR" => Ok(Emotion::Fear),
            "DISGUST" => Ok(Emotion::Disgust),
            "EXCITED" => Ok(Emotion::Excited),
            "NEUTRAL" => Ok(Emotion::Neutral),
            _ => Err(EmotionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown emotion: {0}")]
pub struct EmotionParseError(String);
