//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod calibrate;
pub mod evaluate;
pub mod gesture;
pub mod replay;

#[derive(Debug, Parser)]
#[command(name = "airctrl", version, about = "AIRCTRL emotion and gesture tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON config file (overrides AIRCTRL_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run recorded frames through the emotion pipeline
    Replay(replay::ReplayArgs),
    /// Suggest classifier thresholds from recorded features
    Calibrate(calibrate::CalibrateArgs),
    /// Score the classifier against annotated frames
    Evaluate(evaluate::EvaluateArgs),
    /// Resolve a gesture to an intent and action
    Gesture(gesture::GestureArgs),
}
