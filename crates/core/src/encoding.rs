//! Ordinal encoding fitted at training time
//!
//! Text-valued feature columns and the target column are mapped to integer
//! codes over a vocabulary collected once from the training corpus. The
//! fitted vocabularies travel inside the pipeline artifact so inference
//! applies exactly the mapping training produced.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::CoreError;

/// One feature value on its way into the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

/// Category-to-code mapping for every text-valued feature column
///
/// Categories are stored sorted, so a value's code is its rank in the
/// training vocabulary. A value outside the fitted vocabulary is an error,
/// not a silent mis-encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    vocabularies: BTreeMap<String, Vec<String>>,
}

impl OrdinalEncoder {
    /// Collect the sorted category vocabulary of each listed column.
    pub fn fit(dataset: &Dataset, text_columns: &[String]) -> Result<Self, CoreError> {
        let mut vocabularies = BTreeMap::new();

        for column in text_columns {
            let idx = dataset
                .feature_names
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| CoreError::UnknownColumn(column.clone()))?;

            let categories: BTreeSet<String> =
                dataset.rows.iter().map(|row| row[idx].clone()).collect();
            vocabularies.insert(column.clone(), categories.into_iter().collect());
        }

        Ok(Self { vocabularies })
    }

    /// Whether a column was fitted for categorical encoding.
    pub fn is_encoded(&self, column: &str) -> bool {
        self.vocabularies.contains_key(column)
    }

    /// Code for one category of one column.
    pub fn code(&self, column: &str, value: &str) -> Result<f64, CoreError> {
        let vocabulary = self
            .vocabularies
            .get(column)
            .ok_or_else(|| CoreError::UnknownColumn(column.to_string()))?;

        vocabulary
            .binary_search_by(|category| category.as_str().cmp(value))
            .map(|rank| rank as f64)
            .map_err(|_| CoreError::UnknownCategory {
                column: column.to_string(),
                value: value.to_string(),
            })
    }

    /// Encode one row of cells into the numeric feature vector.
    ///
    /// `columns` must be the schema the row was built against; text cells go
    /// through the fitted vocabulary, numeric cells pass through unchanged.
    pub fn encode_row(&self, columns: &[String], row: &[Cell]) -> Result<Vec<f64>, CoreError> {
        if columns.len() != row.len() {
            return Err(CoreError::RowWidth {
                expected: columns.len(),
                actual: row.len(),
            });
        }

        columns
            .iter()
            .zip(row)
            .map(|(column, cell)| match cell {
                Cell::Text(value) => {
                    if self.is_encoded(column) {
                        self.code(column, value)
                    } else {
                        Err(CoreError::ColumnType {
                            column: column.clone(),
                            expected: "numeric",
                        })
                    }
                }
                Cell::Number(value) => {
                    if self.is_encoded(column) {
                        Err(CoreError::ColumnType {
                            column: column.clone(),
                            expected: "categorical",
                        })
                    } else {
                        Ok(*value)
                    }
                }
            })
            .collect()
    }
}

/// Target-class vocabulary, fitted once over the training labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit(labels: &[String]) -> Result<Self, CoreError> {
        let classes: BTreeSet<String> = labels.iter().cloned().collect();
        if classes.is_empty() {
            return Err(CoreError::NoClasses);
        }
        Ok(Self {
            classes: classes.into_iter().collect(),
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, label: &str) -> Result<u32, CoreError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map(|rank| rank as u32)
            .map_err(|_| CoreError::UnknownCategory {
                column: "target".to_string(),
                value: label.to_string(),
            })
    }

    pub fn decode(&self, code: u32) -> Result<&str, CoreError> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or(CoreError::UnknownClassCode(code))
    }

    pub fn transform(&self, labels: &[String]) -> Result<Vec<u32>, CoreError> {
        labels.iter().map(|label| self.encode(label)).collect()
    }
}
