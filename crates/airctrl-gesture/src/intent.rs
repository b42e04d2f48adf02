//! (gesture, context) → intent rules.
//!
//! The same gesture means different things depending on the focused
//! application. Unmapped combinations resolve to `Intent::None`.

use airctrl_models::{AppContext, Gesture, Intent};
use serde::Serialize;

/// Outcome of interpreting a gesture in a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntentSignal {
    pub gesture: Gesture,
    pub context: AppContext,
    pub intent: Intent,
}

impl IntentSignal {
    pub fn has_intent(&self) -> bool {
        self.intent.is_actionable()
    }
}

/// Resolve the intent for a gesture in a context.
pub fn map_intent(gesture: Gesture, context: AppContext) -> IntentSignal {
    IntentSignal {
        gesture,
        context,
        intent: intent_for(gesture, context),
    }
}

fn intent_for(gesture: Gesture, context: AppContext) -> Intent {
    use AppContext::*;

    match gesture {
        Gesture::Fist => match context {
            Browser | Media => Intent::Pause,
            _ => Intent::None,
        },
        Gesture::OpenPalm => match context {
            Browser => Intent::Home,
            Media => Intent::Stop,
            Document => Intent::FitPage,
            _ => Intent::None,
        },
        Gesture::Point => match context {
            Browser | Document => Intent::ScrollDown,
            Media => Intent::SeekForward,
            Ide => Intent::NextLine,
            Explorer => Intent::Navigate,
            Unknown => Intent::None,
        },
        Gesture::TwoFingers => match context {
            Browser => Intent::ScrollUp,
            Document | Ide => Intent::Zoom,
            Media => Intent::Volume,
            _ => Intent::None,
        },
        Gesture::Unknown => Intent::None,
    }
}

/// Every gesture with a meaning in `context`, for help screens.
pub fn gestures_for_context(context: AppContext) -> Vec<(Gesture, Intent)> {
    Gesture::ALL
        .iter()
        .map(|&g| (g, intent_for(g, context)))
        .filter(|(_, intent)| intent.is_actionable())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_changes_meaning() {
        assert_eq!(map_intent(Gesture::Point, AppContext::Browser).intent, Intent::ScrollDown);
        assert_eq!(map_intent(Gesture::Point, AppContext::Media).intent, Intent::SeekForward);
        assert_eq!(map_intent(Gesture::Point, AppContext::Ide).intent, Intent::NextLine);
        assert_eq!(map_intent(Gesture::Point, AppContext::Explorer).intent, Intent::Navigate);
        assert_eq!(map_intent(Gesture::TwoFingers, AppContext::Ide).intent, Intent::Zoom);
        assert_eq!(map_intent(Gesture::TwoFingers, AppContext::Media).intent, Intent::Volume);
        assert_eq!(map_intent(Gesture::OpenPalm, AppContext::Document).intent, Intent::FitPage);
        assert_eq!(map_intent(Gesture::Fist, AppContext::Media).intent, Intent::Pause);
    }

    #[test]
    fn test_unmapped_combinations_have_no_intent() {
        for &context in AppContext::ALL {
            let signal = map_intent(Gesture::Unknown, context);
            assert_eq!(signal.intent, Intent::None);
            assert!(!signal.has_intent());
        }
        for &gesture in Gesture::ALL {
            assert_eq!(map_intent(gesture, AppContext::Unknown).intent, Intent::None);
        }
        assert_eq!(map_intent(Gesture::Fist, AppContext::Ide).intent, Intent::None);
        assert_eq!(map_intent(Gesture::OpenPalm, AppContext::Explorer).intent, Intent::None);
    }

    #[test]
    fn test_gestures_for_browser() {
        assert_eq!(
            gestures_for_context(AppContext::Browser),
            vec![
                (Gesture::Fist, Intent::Pause),
                (Gesture::OpenPalm, Intent::Home),
                (Gesture::Point, Intent::ScrollDown),
                (Gesture::TwoFingers, Intent::ScrollUp),
            ]
        );
        assert!(gestures_for_context(AppContext::Unknown).is_empty());
    }
}
