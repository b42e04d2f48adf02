//! Closed label sets for the gesture control path.
//!
//! - `Gesture`: what the hand looks like
//! - `AppContext`: where the user's attention is
//! - `Intent`: what the user wants, given gesture and context
//! - `Action`: the concrete operation an intent resolves to

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbolic, context-neutral hand shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    /// All fingers down.
    Fist,
    /// All five fingers extended.
    OpenPalm,
    /// Only the index finger extended.
    Point,
    /// Index and middle fingers extended.
    TwoFingers,
    /// Any other configuration.
    #[default]
    Unknown,
}

impl Gesture {
    pub const ALL: &'static [Gesture] = &[
        Gesture::Fist,
        Gesture::OpenPalm,
        Gesture::Point,
        Gesture::TwoFingers,
        Gesture::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Fist => "FIST",
            Gesture::OpenPalm => "OPEN_PALM",
            Gesture::Point => "POINT",
            Gesture::TwoFingers => "TWO_FINGERS",
            Gesture::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FIST" => Ok(Gesture::Fist),
            "OPEN_PALM" | "PALM" => Ok(Gesture::OpenPalm),
            "POINT" => Ok(Gesture::Point),
            "TWO_FINGERS" | "PEACE" => Ok(Gesture::TwoFingers),
            "UNKNOWN" => Ok(Gesture::Unknown),
            _ => Err(LabelParseError::new("gesture", s)),
        }
    }
}

/// Application category of the focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppContext {
    Browser,
    Media,
    Document,
    Ide,
    Explorer,
    #[default]
    Unknown,
}

impl AppContext {
    pub const ALL: &'static [AppContext] = &[
        AppContext::Browser,
        AppContext::Media,
        AppContext::Document,
        AppContext::Ide,
        AppContext::Explorer,
        AppContext::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppContext::Browser => "BROWSER",
            AppContext::Media => "MEDIA",
            AppContext::Document => "DOCUMENT",
            AppContext::Ide => "IDE",
            AppContext::Explorer => "EXPLORER",
            AppContext::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppContext {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "BROWSER" => Ok(AppContext::Browser),
            "MEDIA" => Ok(AppContext::Media),
            "DOCUMENT" => Ok(AppContext::Document),
            "IDE" => Ok(AppContext::Ide),
            "EXPLORER" => Ok(AppContext::Explorer),
            "UNKNOWN" => Ok(AppContext::Unknown),
            _ => Err(LabelParseError::new("context", s)),
        }
    }
}

/// Abstract user intent. Describes meaning, never execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Pause,
    Home,
    Stop,
    FitPage,
    ScrollUp,
    ScrollDown,
    SeekForward,
    NextLine,
    Navigate,
    Zoom,
    Volume,
    #[default]
    None,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Pause => "PAUSE",
            Intent::Home => "HOME",
            Intent::Stop => "STOP",
            Intent::FitPage => "FIT_PAGE",
            Intent::ScrollUp => "SCROLL_UP",
            Intent::ScrollDown => "SCROLL_DOWN",
            Intent::SeekForward => "SEEK_FORWARD",
            Intent::NextLine => "NEXT_LINE",
            Intent::Navigate => "NAVIGATE",
            Intent::Zoom => "ZOOM",
            Intent::Volume => "VOLUME",
            Intent::None => "NONE",
        }
    }

    /// True for every intent except `None`.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Intent::None)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Concrete operation an intent resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ScrollUp,
    ScrollDown,
    VolumeUp,
    ZoomIn,
    #[default]
    NoAction,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::VolumeUp => "volume_up",
            Action::ZoomIn => "zoom_in",
            Action::NoAction => "no_action",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace(['-', ' '], "_")
}

#[derive(Debug, Error)]
#[error("Unknown {kind}: {value}")]
pub struct LabelParseError {
    kind: &'static str,
    value: String,
}

impl LabelParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_parse_variants() {
        assert_eq!("open-palm".parse::<Gesture>().unwrap(), Gesture::OpenPalm);
        assert_eq!("two fingers".parse::<Gesture>().unwrap(), Gesture::TwoFingers);
        assert_eq!("Point".parse::<Gesture>().unwrap(), Gesture::Point);
        for g in Gesture::ALL {
            assert_eq!(g.as_str().parse::<Gesture>().unwrap(), *g);
        }
    }

    #[test]
    fn test_context_parse_rejects_unknown_names() {
        let err = "spreadsheet".parse::<AppContext>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown context: spreadsheet");
        for c in AppContext::ALL {
            assert_eq!(c.as_str().parse::<AppContext>().unwrap(), *c);
        }
    }

    #[test]
    fn test_intent_actionable() {
        assert!(Intent::Zoom.is_actionable());
        assert!(!Intent::None.is_actionable());
    }

    #[test]
    fn test_action_serde_is_snake_case() {
        assert_eq!(serde_json::to_string(&Action::NoAction).unwrap(), "\"no_action\"");
        assert_eq!(serde_json::to_string(&Intent::FitPage).unwrap(), "\"FIT_PAGE\"");
    }
}
