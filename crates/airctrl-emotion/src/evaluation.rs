//! Per-class precision, recall and F1 against annotated labels.

use std::collections::{BTreeMap, BTreeSet};

use airctrl_models::Emotion;
use serde::{Deserialize, Serialize};

use crate::error::{EmotionError, EmotionResult};

/// Metrics for one label. Ratios with a zero denominator are 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Ground-truth occurrences
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// One entry per label seen in either sequence
    pub per_class: BTreeMap<Emotion, ClassMetrics>,
    pub accuracy: f64,
    pub macro_f1: f64,
    pub total: usize,
}

/// Compare predictions to ground truth.
pub fn evaluate(y_true: &[Emotion], y_pred: &[Emotion]) -> EmotionResult<EvaluationReport> {
    if y_true.is_empty() {
        return Err(EmotionError::invalid_input("no samples to evaluate"));
    }
    if y_true.len() != y_pred.len() {
        return Err(EmotionError::invalid_input(format!(
            "length mismatch: {} labels, {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }

    let labels: BTreeSet<Emotion> = y_true.iter().chain(y_pred).copied().collect();
    let pairs = || y_true.iter().zip(y_pred);

    let per_class: BTreeMap<Emotion, ClassMetrics> = labels
        .into_iter()
        .map(|label| {
            let tp = pairs().filter(|(t, p)| **t == label && **p == label).count();
            let fp = pairs().filter(|(t, p)| **t != label && **p == label).count();
            let fn_ = pairs().filter(|(t, p)| **t == label && **p != label).count();

            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            let support = tp + fn_;

            (
                label,
                ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support,
                },
            )
        })
        .collect();

    let correct = pairs().filter(|(t, p)| t == p).count();
    let macro_f1 = per_class.values().map(|m| m.f1).sum::<f64>() / per_class.len() as f64;

    Ok(EvaluationReport {
        accuracy: ratio(correct, y_true.len()),
        macro_f1,
        total: y_true.len(),
        per_class,
    })
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
