//! `airctrl calibrate`: propose thresholds from recorded features.

use std::fs;
use std::path::PathBuf;

use airctrl_emotion::{
    suggest_thresholds, summarize, CalibrationSuggestion, ClassifierThresholds, EmotionConfig,
    FeatureSummary,
};
use airctrl_models::FacialFeatures;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::jsonl::read_jsonl;
use crate::logging::SessionLogger;

#[derive(Debug, Args)]
pub struct CalibrateArgs {
    /// Frame records (or any lines with a `features` object) as JSON Lines
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write a full config with the suggested thresholds applied
    #[arg(long)]
    pub write_config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct FeatureLine {
    features: FacialFeatures,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    pub samples: usize,
    pub summary: FeatureSummary,
    pub suggestion: CalibrationSuggestion,
    /// Current thresholds with the suggestion applied
    pub thresholds: ClassifierThresholds,
}

pub fn run(args: &CalibrateArgs, config: &CliConfig) -> CliResult<CalibrationReport> {
    let logger = SessionLogger::new("calibrate");
    let _span = logger.create_span().entered();
    logger.log_start(&format!("summarizing {}", args.input.display()));

    let samples: Vec<FacialFeatures> = read_jsonl::<FeatureLine>(&args.input)?
        .into_iter()
        .map(|(_, line)| line.features)
        .collect();
    if samples.is_empty() {
        return Err(CliError::config_error(format!(
            "{} contains no feature samples",
            args.input.display()
        )));
    }

    let summary = summarize(&samples);
    let suggestion = suggest_thresholds(&summary)?;
    let thresholds = suggestion.apply_to(&config.emotion.thresholds);

    if let Some(path) = &args.write_config {
        let tuned = EmotionConfig {
            thresholds: thresholds.clone(),
            stabilizer: config.emotion.stabilizer.clone(),
        };
        tuned.validate()?;
        fs::write(path, serde_json::to_string_pretty(&tuned)?)?;
        logger.log_progress(&format!("wrote tuned config to {}", path.display()));
    }

    logger.log_completion(&format!("{} samples", samples.len()));
    Ok(CalibrationReport {
        samples: samples.len(),
        summary,
        suggestion,
        thresholds,
    })
}
