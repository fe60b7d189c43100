//! The trained prediction pipeline and its on-disk artifact
//!
//! A pipeline bundles the fitted encoders with the trained forest so that
//! inference applies exactly the column order and vocabularies seen at
//! training time. The artifact is written once by the trainer and loaded
//! read-only by the server and the interactive client.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::encoding::{Cell, LabelEncoder, OrdinalEncoder};
use crate::error::CoreError;
use crate::record::PatientRecord;
use crate::training::HyperParams;

pub(crate) type Forest = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Facts recorded about a training run, carried inside the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineMetadata {
    /// Unix timestamp of the training run.
    pub trained_at: i64,
    /// Winning hyperparameter configuration.
    pub params: HyperParams,
    /// Accuracy on the held-out test split.
    pub test_accuracy: f64,
}

/// Fitted encoder + trained classifier, treated as one opaque predictor
#[derive(Debug, Serialize, Deserialize)]
pub struct ObesityPipeline {
    feature_names: Vec<String>,
    encoder: OrdinalEncoder,
    labels: LabelEncoder,
    forest: Forest,
    pub metadata: PipelineMetadata,
}

impl ObesityPipeline {
    pub(crate) fn new(
        feature_names: Vec<String>,
        encoder: OrdinalEncoder,
        labels: LabelEncoder,
        forest: Forest,
        metadata: PipelineMetadata,
    ) -> Self {
        Self {
            feature_names,
            encoder,
            labels,
            forest,
            metadata,
        }
    }

    /// Feature column names in the order the pipeline was fitted with.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Diagnosis classes the pipeline can emit.
    pub fn classes(&self) -> &[String] {
        self.labels.classes()
    }

    /// Predict the diagnosis label for one patient record.
    pub fn predict(&self, record: &PatientRecord) -> Result<String, CoreError> {
        let row: Vec<Cell> = self
            .feature_names
            .iter()
            .map(|name| {
                record
                    .cell(name)
                    .ok_or_else(|| CoreError::UnknownColumn(name.clone()))
            })
            .collect::<Result<_, _>>()?;
        self.predict_cells(&row)
    }

    /// Predict the diagnosis label for one already-assembled feature row.
    pub fn predict_cells(&self, row: &[Cell]) -> Result<String, CoreError> {
        let encoded = self.encoder.encode_row(&self.feature_names, row)?;
        let x = DenseMatrix::from_2d_vec(&vec![encoded]);

        let codes = self
            .forest
            .predict(&x)
            .map_err(|e| CoreError::Model(e.to_string()))?;
        let code = codes.first().ok_or(CoreError::EmptyPrediction)?;

        Ok(self.labels.decode(*code)?.to_string())
    }

    /// Serialize the pipeline to disk, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Load a previously saved pipeline.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
