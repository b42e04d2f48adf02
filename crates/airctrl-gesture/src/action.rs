//! Intent → action resolution and gated dispatch.
//!
//! Execution is opt-in. An `ActionSession` starts disabled and only
//! forwards actions to its sink after `enable()`. A sink reporting a
//! fail-safe (the user's emergency stop) disables the session on the spot.

use airctrl_models::{Action, Intent};
use metrics::counter;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{GestureError, GestureResult};

/// Concrete action for an intent. Intents with no executable counterpart
/// resolve to `Action::NoAction`.
pub fn intent_to_action(intent: Intent) -> Action {
    match intent {
        Intent::ScrollUp => Action::ScrollUp,
        Intent::ScrollDown => Action::ScrollDown,
        Intent::Volume => Action::VolumeUp,
        Intent::Zoom => Action::ZoomIn,
        _ => Action::NoAction,
    }
}

/// Something that can carry out an action.
#[cfg_attr(test, mockall::automock)]
pub trait ActionSink {
    fn perform(&mut self, action: Action) -> GestureResult<()>;
}

/// Sink that only logs what it would do.
#[derive(Debug, Default)]
pub struct TracingSink {
    performed: Vec<Action>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions received so far.
    pub fn performed(&self) -> &[Action] {
        &self.performed
    }
}

impl ActionSink for TracingSink {
    fn perform(&mut self, action: Action) -> GestureResult<()> {
        info!(action = %action, "Dry run: action not executed");
        self.performed.push(action);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Session disabled; nothing was sent to the sink.
    Blocked,
    /// The action was `NoAction`.
    NoAction,
    Performed,
    /// The sink failed; the session stays enabled.
    Failed,
    /// The sink raised a fail-safe; the session is now disabled.
    EmergencyStop,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Blocked => "blocked",
            DispatchOutcome::NoAction => "no_action",
            DispatchOutcome::Performed => "performed",
            DispatchOutcome::Failed => "failed",
            DispatchOutcome::EmergencyStop => "emergency_stop",
        }
    }
}

/// Execution gate owned by the caller.
#[derive(Debug, Default)]
pub struct ActionSession {
    enabled: bool,
}

impl ActionSession {
    /// New session, disabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self) {
        info!("Action execution enabled");
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        info!("Action execution disabled");
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Send `action` to `sink` if the session allows it.
    pub fn dispatch<S: ActionSink + ?Sized>(&mut self, action: Action, sink: &mut S) -> DispatchOutcome {
        let outcome = self.try_dispatch(action, sink);
        counter!(
            "airctrl_actions_total",
            "action" => action.as_str(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
        outcome
    }

    fn try_dispatch<S: ActionSink + ?Sized>(&mut self, action: Action, sink: &mut S) -> DispatchOutcome {
        if !self.enabled {
            debug!(action = %action, "Action blocked, execution disabled");
            return DispatchOutcome::Blocked;
        }
        if action == Action::NoAction {
            return DispatchOutcome::NoAction;
        }

        match sink.perform(action) {
            Ok(()) => DispatchOutcome::Performed,
            Err(GestureError::FailSafe(reason)) => {
                error!(action = %action, reason = %reason, "Emergency stop, disabling execution");
                self.enabled = false;
                DispatchOutcome::EmergencyStop
            }
            Err(e) => {
                warn!(action = %action, error = %e, "Action failed");
                DispatchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_intent_to_action() {
        assert_eq!(intent_to_action(Intent::ScrollUp), Action::ScrollUp);
        assert_eq!(intent_to_action(Intent::ScrollDown), Action::ScrollDown);
        assert_eq!(intent_to_action(Intent::Volume), Action::VolumeUp);
        assert_eq!(intent_to_action(Intent::Zoom), Action::ZoomIn);
        for intent in [Intent::Pause, Intent::Home, Intent::Stop, Intent::Navigate, Intent::None] {
            assert_eq!(intent_to_action(intent), Action::NoAction);
        }
    }

    #[test]
    fn test_disabled_session_blocks_without_calling_sink() {
        let mut sink = MockActionSink::new();
        sink.expect_perform().never();

        let mut session = ActionSession::new();
        assert!(!session.is_enabled());
        assert_eq!(session.dispatch(Action::ScrollUp, &mut sink), DispatchOutcome::Blocked);
    }

    #[test]
    fn test_no_action_skips_sink() {
        let mut sink = MockActionSink::new();
        sink.expect_perform().never();

        let mut session = ActionSession::new();
        session.enable();
        assert_eq!(session.dispatch(Action::NoAction, &mut sink), DispatchOutcome::NoAction);
    }

    #[test]
    fn test_enabled_session_performs() {
        let mut sink = MockActionSink::new();
        sink.expect_perform()
            .with(eq(Action::ZoomIn))
            .times(1)
            .returning(|_| Ok(()));

        let mut session = ActionSession::new();
        session.enable();
        assert_eq!(session.dispatch(Action::ZoomIn, &mut sink), DispatchOutcome::Performed);
        assert!(session.is_enabled());
    }

    #[test]
    fn test_fail_safe_disables_session() {
        let mut sink = MockActionSink::new();
        sink.expect_perform()
            .times(1)
            .returning(|_| Err(GestureError::fail_safe("pointer in corner")));

        let mut session = ActionSession::new();
        session.enable();
        assert_eq!(
            session.dispatch(Action::ScrollDown, &mut sink),
            DispatchOutcome::EmergencyStop
        );
        assert!(!session.is_enabled());

        // Further actions are blocked without reaching the sink
        assert_eq!(session.dispatch(Action::ScrollDown, &mut sink), DispatchOutcome::Blocked);
    }

    #[test]
    fn test_ordinary_failure_keeps_session_enabled() {
        let mut sink = MockActionSink::new();
        sink.expect_perform()
            .times(2)
            .returning(|_| Err(GestureError::execution("device busy")));

        let mut session = ActionSession::new();
        session.enable();
        assert_eq!(session.dispatch(Action::VolumeUp, &mut sink), DispatchOutcome::Failed);
        assert_eq!(session.dispatch(Action::VolumeUp, &mut sink), DispatchOutcome::Failed);
        assert!(session.is_enabled());
    }

    #[test]
    fn test_tracing_sink_records() {
        let mut sink = TracingSink::new();
        let mut session = ActionSession::new();
        session.enable();
        session.dispatch(Action::ScrollUp, &mut sink);
        session.dispatch(Action::NoAction, &mut sink);
        session.disable();
        session.dispatch(Action::ZoomIn, &mut sink);

        assert_eq!(sink.performed(), &[Action::ScrollUp]);
    }
}
