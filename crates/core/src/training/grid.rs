//! Hyperparameter grid for the forest search

use std::fmt;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifierParameters;

/// Tree counts explored by the exhaustive grid.
pub const TREE_COUNTS: [u16; 3] = [50, 100, 200];
/// Maximum depths explored; `None` grows trees unbounded.
pub const MAX_DEPTHS: [Option<u16>; 3] = [None, Some(10), Some(20)];
/// Minimum samples required to split a node.
pub const MIN_SAMPLES_SPLITS: [usize; 3] = [2, 5, 10];

/// One forest configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperParams {
    pub n_trees: u16,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
}

impl HyperParams {
    /// Lower the configuration into classifier parameters with a fixed seed.
    pub fn to_forest_params(self, seed: u64) -> RandomForestClassifierParameters {
        let mut params = RandomForestClassifierParameters::default()
            .with_n_trees(self.n_trees)
            .with_min_samples_split(self.min_samples_split)
            .with_seed(seed);
        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }
        params
    }
}

impl fmt::Display for HyperParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n_trees={} max_depth=", self.n_trees)?;
        match self.max_depth {
            Some(depth) => write!(f, "{depth}")?,
            None => write!(f, "unbounded")?,
        }
        write!(f, " min_samples_split={}", self.min_samples_split)
    }
}

/// An ordered set of configurations to score
///
/// Order matters: ties during the search resolve toward the earlier
/// candidate, which keeps the outcome deterministic run-to-run.
#[derive(Debug, Clone)]
pub struct SearchGrid {
    pub candidates: Vec<HyperParams>,
}

impl SearchGrid {
    /// The full 3x3x3 grid, tree count varying slowest.
    pub fn exhaustive() -> Self {
        let mut candidates = Vec::with_capacity(27);
        for n_trees in TREE_COUNTS {
            for max_depth in MAX_DEPTHS {
                for min_samples_split in MIN_SAMPLES_SPLITS {
                    candidates.push(HyperParams {
                        n_trees,
                        max_depth,
                        min_samples_split,
                    });
                }
            }
        }
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Default for SearchGrid {
    fn default() -> Self {
        Self::exhaustive()
    }
}
