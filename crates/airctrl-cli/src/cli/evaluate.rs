//! `airctrl evaluate`: score predictions against annotated frames.

use std::path::PathBuf;

use airctrl_emotion::{evaluate, EmotionClassifier, EmotionPipeline, EvaluationReport};
use airctrl_models::{Emotion, FacialFeatures};
use clap::Args;
use serde::Deserialize;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::jsonl::read_jsonl;
use crate::logging::SessionLogger;

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Lines of `{"features": {...}, "label": "HAPPY"}`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Score the stabilized label instead of the raw classification
    #[arg(long)]
    pub stabilized: bool,
}

#[derive(Debug, Deserialize)]
struct AnnotatedFrame {
    features: FacialFeatures,
    label: String,
}

pub fn run(args: &EvaluateArgs, config: &CliConfig) -> CliResult<EvaluationReport> {
    let logger = SessionLogger::new("evaluate");
    let _span = logger.create_span().entered();
    logger.log_start(&format!(
        "evaluating {} ({})",
        args.input.display(),
        if args.stabilized { "stabilized" } else { "raw" }
    ));

    let frames: Vec<(usize, AnnotatedFrame)> = read_jsonl(&args.input)?;
    let classifier = EmotionClassifier::new(config.emotion.thresholds.clone());
    let mut pipeline = EmotionPipeline::new(config.emotion.clone());

    let mut y_true = Vec::with_capacity(frames.len());
    let mut y_pred = Vec::with_capacity(frames.len());
    for (line, frame) in frames {
        let label: Emotion = frame
            .label
            .parse()
            .map_err(|e| CliError::invalid_record(&args.input, line, format!("{e}")))?;
        let predicted = if args.stabilized {
            pipeline.process_features(frame.features).emotion
        } else {
            classifier.classify(&frame.features)
        };
        y_true.push(label);
        y_pred.push(predicted);
    }

    let report = evaluate(&y_true, &y_pred)?;
    logger.log_completion(&format!(
        "accuracy {:.3}, macro F1 {:.3} over {} frames",
        report.accuracy, report.macro_f1, report.total
    ));
    Ok(report)
}
