//! Gesture control path: hand landmarks → gesture → intent → action.
//!
//! Recognition and intent mapping are pure rule lookups. Only
//! `ActionSession::dispatch` has side effects, and only through a
//! caller-supplied `ActionSink`.

pub mod action;
pub mod error;
pub mod fingers;
pub mod intent;
pub mod vocabulary;

pub use action::{intent_to_action, ActionSession, ActionSink, DispatchOutcome, TracingSink};
pub use error::{GestureError, GestureResult};
pub use fingers::{FingerStates, HAND_LANDMARK_COUNT};
pub use intent::{gestures_for_context, map_intent, IntentSignal};
pub use vocabulary::{identify_gesture, recognize, GestureSignal};
