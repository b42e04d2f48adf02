//! `airctrl gesture`: resolve a gesture in a context.

use std::fs;
use std::path::PathBuf;

use airctrl_gesture::{
    intent_to_action, map_intent, recognize, ActionSession, DispatchOutcome, TracingSink,
};
use airctrl_models::{Action, AppContext, Gesture, Intent, Landmark};
use clap::Args;
use serde::Serialize;

use crate::error::CliResult;
use crate::logging::SessionLogger;

#[derive(Debug, Args)]
pub struct GestureArgs {
    /// Gesture name (fist, open_palm, point, two_fingers)
    #[arg(short, long, required_unless_present = "hand", conflicts_with = "hand")]
    pub gesture: Option<Gesture>,

    /// JSON array of 21 hand landmarks to recognize instead
    #[arg(long)]
    pub hand: Option<PathBuf>,

    /// Application context (browser, media, document, ide, explorer)
    #[arg(short, long, default_value = "unknown")]
    pub context: AppContext,

    /// Dispatch the action through the dry-run sink
    #[arg(long)]
    pub execute: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GestureReport {
    pub gesture: Gesture,
    pub finger_count: Option<u8>,
    pub context: AppContext,
    pub intent: Intent,
    pub action: Action,
    pub outcome: Option<DispatchOutcome>,
}

pub fn run(args: &GestureArgs) -> CliResult<GestureReport> {
    let logger = SessionLogger::new("gesture");
    let _span = logger.create_span().entered();

    let (gesture, finger_count) = match (&args.hand, args.gesture) {
        (Some(path), _) => {
            let points: Vec<Landmark> = serde_json::from_str(&fs::read_to_string(path)?)?;
            let signal = recognize(&points)?;
            (signal.gesture, Some(signal.finger_count))
        }
        (None, Some(gesture)) => (gesture, None),
        (None, None) => (Gesture::Unknown, None),
    };
    logger.log_start(&format!("{gesture} in {}", args.context));

    let signal = map_intent(gesture, args.context);
    let action = intent_to_action(signal.intent);

    let outcome = if args.execute {
        let mut session = ActionSession::new();
        session.enable();
        Some(session.dispatch(action, &mut TracingSink::new()))
    } else {
        None
    };

    logger.log_completion(&format!("{} -> {}", signal.intent, action));
    Ok(GestureReport {
        gesture,
        finger_count,
        context: args.context,
        intent: signal.intent,
        action,
        outcome,
    })
}
