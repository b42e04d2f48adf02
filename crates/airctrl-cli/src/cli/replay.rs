//! `airctrl replay`: feed recorded frames through the pipeline.

use std::path::PathBuf;

use airctrl_emotion::{EmotionError, EmotionPipeline};
use airctrl_models::{
    Emotion, EmotionStats, FaceBoundingBox, FacialFeatures, FrameRecord, Landmark,
};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::jsonl::{read_jsonl, JsonlWriter};
use crate::logging::SessionLogger;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Frames as JSON Lines
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write one frame record per processed frame
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One recorded frame: either precomputed features or raw landmarks.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameLine {
    pub features: Option<FacialFeatures>,
    pub landmarks: Option<Vec<Landmark>>,
    /// Derived from the landmarks when absent
    pub bbox: Option<FaceBoundingBox>,
    pub fps: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub session_id: String,
    pub frames_processed: usize,
    pub frames_rejected: usize,
    pub switches: usize,
    pub final_emotion: Emotion,
    /// Smoothed signals after the last processed frame
    pub final_features: Option<FacialFeatures>,
    pub stats: EmotionStats,
}

pub fn run(args: &ReplayArgs, config: &CliConfig) -> CliResult<ReplayReport> {
    let logger = SessionLogger::new("replay");
    let _span = logger.create_span().entered();
    logger.log_start(&format!("replaying {}", args.input.display()));

    let frames: Vec<(usize, FrameLine)> = read_jsonl(&args.input)?;
    let mut writer = args.output.as_deref().map(JsonlWriter::create).transpose()?;
    let mut pipeline = EmotionPipeline::new(config.emotion.clone());

    let mut processed = 0;
    let mut rejected = 0;
    let mut switches = 0;
    let mut previous = pipeline.stabilizer().current_emotion();

    for (line, frame) in frames {
        let state = if let Some(features) = frame.features {
            pipeline.process_features(features)
        } else if let Some(landmarks) = &frame.landmarks {
            let Some(bbox) = frame.bbox.or_else(|| FaceBoundingBox::from_landmarks(landmarks)) else {
                rejected += 1;
                logger.log_warning(&format!("line {line}: no landmarks to derive a bounding box"));
                continue;
            };
            if !bbox.is_valid() {
                rejected += 1;
                logger.log_warning(&format!("line {line}: frame skipped, degenerate bounding box"));
                continue;
            }
            match pipeline.process(landmarks, &bbox) {
                Ok(state) => state,
                Err(EmotionError::InvalidInput(reason)) => {
                    rejected += 1;
                    logger.log_warning(&format!("line {line}: frame skipped, {reason}"));
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            return Err(CliError::invalid_record(
                &args.input,
                line,
                "expected either `features` or `landmarks`",
            ));
        };

        processed += 1;
        if state.emotion != previous {
            switches += 1;
            previous = state.emotion;
        }

        if let Some(writer) = writer.as_mut() {
            let timestamp = frame.timestamp.unwrap_or_else(Utc::now);
            let fps = frame.fps.unwrap_or(config.default_fps);
            writer.write(&FrameRecord::new(timestamp, fps, &state))?;
        }
    }

    if let Some(writer) = writer {
        let written = writer.finish()?;
        logger.log_progress(&format!("wrote {written} frame records"));
    }

    let report = ReplayReport {
        session_id: logger.session_id().to_string(),
        frames_processed: processed,
        frames_rejected: rejected,
        switches,
        final_emotion: pipeline.stabilizer().current_emotion(),
        final_features: pipeline.stabilizer().smoothed_features(),
        stats: pipeline.stats(),
    };
    logger.log_completion(&format!(
        "{} frames, {} rejected, {} switches, final {}",
        report.frames_processed, report.frames_rejected, report.switches, report.final_emotion
    ));
    Ok(report)
}
