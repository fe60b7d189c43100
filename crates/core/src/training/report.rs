//! Held-out evaluation: accuracy and a per-class classification report

use serde::Serialize;

/// Precision/recall/F1 for one diagnosis class
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    pub class: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of test rows truly belonging to this class.
    pub support: usize,
}

/// Test-split evaluation of a trained pipeline
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub per_class: Vec<ClassMetrics>,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compare predictions against ground truth, per class and overall.
///
/// `classes` supplies the display name for each encoded label; classes with
/// zero support still appear in the report.
pub fn evaluate(classes: &[String], y_true: &[u32], y_pred: &[u32]) -> Evaluation {
    let matches = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();
    let accuracy = ratio(matches, y_true.len());

    let per_class = classes
        .iter()
        .enumerate()
        .map(|(idx, class)| {
            let code = idx as u32;
            let true_positives = y_true
                .iter()
                .zip(y_pred)
                .filter(|(truth, pred)| **truth == code && **pred == code)
                .count();
            let predicted = y_pred.iter().filter(|pred| **pred == code).count();
            let support = y_true.iter().filter(|truth| **truth == code).count();

            let precision = ratio(true_positives, predicted);
            let recall = ratio(true_positives, support);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };

            ClassMetrics {
                class: class.clone(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    Evaluation {
        accuracy,
        per_class,
    }
}
