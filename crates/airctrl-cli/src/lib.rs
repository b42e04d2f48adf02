//! AIRCTRL command-line tooling.
//!
//! This crate provides:
//! - Offline replay of recorded frames through the emotion pipeline
//! - Threshold calibration from recorded features
//! - Evaluation against annotated frames
//! - Gesture → intent → action resolution with a dry-run sink

pub mod cli;
pub mod config;
pub mod error;
pub mod jsonl;
pub mod logging;

pub use cli::{Cli, Commands};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use logging::SessionLogger;
