//! Core library for obesity diagnosis prediction
//!
//! This crate provides the pieces shared by the trainer, the HTTP service
//! and the interactive client:
//! - Patient record schema and wire-level validation
//! - CSV corpus loading with text-column detection
//! - Ordinal encoding fitted at training time
//! - The trained pipeline artifact (save/load/predict)
//! - Grid-searched forest training and evaluation

pub mod dataset;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod training;

pub use dataset::Dataset;
pub use encoding::{Cell, LabelEncoder, OrdinalEncoder};
pub use error::{CoreError, FieldError, ValidationError};
pub use pipeline::{ObesityPipeline, PipelineMetadata};
pub use record::{PatientRecord, COLUMNS, LABELS};
pub use training::{train_pipeline, SearchGrid, TrainingOutcome};
