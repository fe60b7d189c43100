//! Cross-validated grid search over forest configurations

use rayon::prelude::*;
use smartcore::api::SupervisedEstimator;
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::accuracy;
use smartcore::model_selection::{cross_validate, KFold};
use tracing::info;

use super::grid::{HyperParams, SearchGrid};
use crate::error::CoreError;

/// Seed used for splitting, cross-validation and forest construction.
pub const TRAIN_SEED: u64 = 42;

/// Cross-validation folds per grid candidate.
pub const CV_FOLDS: usize = 3;

/// One scored grid candidate
#[derive(Debug, Clone, Copy)]
pub struct CandidateScore {
    pub params: HyperParams,
    /// Mean accuracy across the cross-validation folds.
    pub cv_accuracy: f64,
}

/// Score every candidate with k-fold cross-validation on the training split.
///
/// Candidates are evaluated in parallel; the returned scores keep grid
/// order so tie-breaking stays deterministic.
pub fn grid_search(
    grid: &SearchGrid,
    x: &DenseMatrix<f64>,
    y: &Vec<u32>,
) -> Result<Vec<CandidateScore>, CoreError> {
    if grid.is_empty() {
        return Err(CoreError::EmptyGrid);
    }

    grid.candidates
        .par_iter()
        .map(|&params| {
            let folds = KFold::default().with_n_splits(CV_FOLDS);
            let result = cross_validate(
                RandomForestClassifier::new(),
                x,
                y,
                params.to_forest_params(TRAIN_SEED),
                &folds,
                &|y_true: &Vec<u32>, y_pred: &Vec<u32>| accuracy(y_true, y_pred),
            )
            .map_err(|e| CoreError::Model(e.to_string()))?;

            let cv_accuracy = result.mean_test_score();
            info!(params = %params, cv_accuracy, "Scored grid candidate");
            Ok(CandidateScore {
                params,
                cv_accuracy,
            })
        })
        .collect()
}

/// The best-scoring candidate; earlier grid position wins ties.
pub fn best_candidate(scores: &[CandidateScore]) -> Option<CandidateScore> {
    scores
        .iter()
        .copied()
        .reduce(|best, candidate| {
            if candidate.cv_accuracy > best.cv_accuracy {
                candidate
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(n_trees: u16, cv_accuracy: f64) -> CandidateScore {
        CandidateScore {
            params: HyperParams {
                n_trees,
                max_depth: None,
                min_samples_split: 2,
            },
            cv_accuracy,
        }
    }

    #[test]
    fn test_best_candidate_picks_highest_score() {
        let scores = vec![score(50, 0.80), score(100, 0.92), score(200, 0.85)];
        assert_eq!(best_candidate(&scores).unwrap().params.n_trees, 100);
    }

    #[test]
    fn test_best_candidate_ties_break_toward_earlier() {
        let scores = vec![score(50, 0.90), score(100, 0.90)];
        assert_eq!(best_candidate(&scores).unwrap().params.n_trees, 50);
    }

    #[test]
    fn test_best_candidate_of_empty_is_none() {
        assert!(best_candidate(&[]).is_none());
    }
}
