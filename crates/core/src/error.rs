//! Error types for the obesity prediction core

use serde::Serialize;
use thiserror::Error;

/// Errors raised by dataset loading, encoding, training and inference
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no column named {0:?}")]
    MissingTargetColumn(String),

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("numeric column {column:?} contains non-numeric value {value:?}")]
    NumericParse { column: String, value: String },

    #[error("unknown category {value:?} for column {column:?}")]
    UnknownCategory { column: String, value: String },

    #[error("column {column:?} expects a {expected} value")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("row has {actual} cells but the schema has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    #[error("unknown feature column {0:?}")]
    UnknownColumn(String),

    #[error("unknown class code {0}")]
    UnknownClassCode(u32),

    #[error("target column contains no classes")]
    NoClasses,

    #[error("hyperparameter grid is empty")]
    EmptyGrid,

    #[error("model error: {0}")]
    Model(String),

    #[error("pipeline artifact error: {0}")]
    Artifact(#[from] bincode::Error),

    #[error("pipeline produced no prediction")]
    EmptyPrediction,
}

/// A single field-level problem found while validating an incoming record
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Aggregated validation failure for an incoming record
///
/// Fields are checked in their declared order and every problem is collected
/// before the request is rejected, so one response names all offending fields.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
