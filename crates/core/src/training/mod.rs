//! Offline pipeline training
//!
//! One-shot batch flow: encode the corpus, split 80/20, grid-search the
//! forest with cross-validation, refit the winner on the training split and
//! evaluate it on the held-out rows. Any failure aborts the run; there are
//! no retries.

mod grid;
mod report;
mod search;

pub use grid::{HyperParams, SearchGrid, MAX_DEPTHS, MIN_SAMPLES_SPLITS, TREE_COUNTS};
pub use report::{evaluate, ClassMetrics, Evaluation};
pub use search::{best_candidate, grid_search, CandidateScore, CV_FOLDS, TRAIN_SEED};

use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;
use tracing::info;

use crate::dataset::Dataset;
use crate::encoding::{LabelEncoder, OrdinalEncoder};
use crate::error::CoreError;
use crate::pipeline::{ObesityPipeline, PipelineMetadata};

/// Fraction of the corpus held out for evaluation.
pub const TEST_FRACTION: f32 = 0.2;

/// Everything a training run produces
#[derive(Debug)]
pub struct TrainingOutcome {
    pub pipeline: ObesityPipeline,
    /// Every grid candidate with its cross-validation score, in grid order.
    pub scores: Vec<CandidateScore>,
    pub best: CandidateScore,
    pub evaluation: Evaluation,
}

/// Fit the full pipeline over a labeled corpus.
pub fn train_pipeline(dataset: &Dataset, grid: &SearchGrid) -> Result<TrainingOutcome, CoreError> {
    if dataset.is_empty() {
        return Err(CoreError::EmptyDataset);
    }

    let text_columns = dataset.text_columns();
    info!(
        rows = dataset.len(),
        features = dataset.feature_names.len(),
        text_columns = ?text_columns,
        "Preparing training corpus"
    );

    let encoder = OrdinalEncoder::fit(dataset, &text_columns)?;
    let labels = LabelEncoder::fit(&dataset.labels)?;

    let encoded: Vec<Vec<f64>> = dataset
        .typed_rows(&text_columns)?
        .iter()
        .map(|row| encoder.encode_row(&dataset.feature_names, row))
        .collect::<Result<_, _>>()?;
    let x = DenseMatrix::from_2d_vec(&encoded);
    let y = labels.transform(&dataset.labels)?;

    let (x_train, x_test, y_train, y_test) =
        train_test_split(&x, &y, TEST_FRACTION, true, Some(TRAIN_SEED));
    info!(
        train_rows = y_train.len(),
        test_rows = y_test.len(),
        candidates = grid.len(),
        folds = CV_FOLDS,
        "Starting grid search"
    );

    let scores = grid_search(grid, &x_train, &y_train)?;
    let best = best_candidate(&scores).ok_or(CoreError::EmptyGrid)?;
    info!(params = %best.params, cv_accuracy = best.cv_accuracy, "Selected best candidate");

    let forest = RandomForestClassifier::fit(
        &x_train,
        &y_train,
        best.params.to_forest_params(TRAIN_SEED),
    )
    .map_err(|e| CoreError::Model(e.to_string()))?;

    let y_pred = forest
        .predict(&x_test)
        .map_err(|e| CoreError::Model(e.to_string()))?;
    let evaluation = evaluate(labels.classes(), &y_test, &y_pred);
    info!(accuracy = evaluation.accuracy, "Evaluated on held-out split");

    let pipeline = ObesityPipeline::new(
        dataset.feature_names.clone(),
        encoder,
        labels,
        forest,
        PipelineMetadata {
            trained_at: chrono::Utc::now().timestamp(),
            params: best.params,
            test_accuracy: evaluation.accuracy,
        },
    );

    Ok(TrainingOutcome {
        pipeline,
        scores,
        best,
        evaluation,
    })
}
