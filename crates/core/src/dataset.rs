//! Labeled tabular corpus loaded from CSV
//!
//! The trainer works against raw string cells so that text-valued columns
//! can be detected from the data itself rather than a hardcoded schema.

use std::path::Path;

use crate::encoding::Cell;
use crate::error::CoreError;

/// A labeled training corpus: feature columns plus one target column
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature column names, in file order (target column removed).
    pub feature_names: Vec<String>,
    /// Raw feature cells, one inner vector per corpus row.
    pub rows: Vec<Vec<String>>,
    /// Target value per row.
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn new(feature_names: Vec<String>, rows: Vec<Vec<String>>, labels: Vec<String>) -> Self {
        Self {
            feature_names,
            rows,
            labels,
        }
    }

    /// Read a headered CSV file and split off the target column.
    pub fn from_csv_path(path: impl AsRef<Path>, target_column: &str) -> Result<Self, CoreError> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let target_idx = headers
            .iter()
            .position(|header| header == target_column)
            .ok_or_else(|| CoreError::MissingTargetColumn(target_column.to_string()))?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != target_idx)
            .map(|(_, header)| header.clone())
            .collect();

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = Vec::with_capacity(feature_names.len());
            for (idx, cell) in record.iter().enumerate() {
                if idx == target_idx {
                    labels.push(cell.trim().to_string());
                } else {
                    row.push(cell.trim().to_string());
                }
            }
            rows.push(row);
        }

        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns whose stored values are text rather than numbers.
    ///
    /// A column counts as numeric only when every one of its cells parses
    /// as a float; anything else is marked for categorical encoding.
    pub fn text_columns(&self) -> Vec<String> {
        self.feature_names
            .iter()
            .enumerate()
            .filter(|(idx, _)| {
                self.rows
                    .iter()
                    .any(|row| row[*idx].parse::<f64>().is_err())
            })
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Type each raw row against the detected text columns.
    pub fn typed_rows(&self, text_columns: &[String]) -> Result<Vec<Vec<Cell>>, CoreError> {
        let is_text: Vec<bool> = self
            .feature_names
            .iter()
            .map(|name| text_columns.contains(name))
            .collect();

        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&is_text)
                    .zip(&self.feature_names)
                    .map(|((cell, text), name)| {
                        if *text {
                            Ok(Cell::Text(cell.clone()))
                        } else {
                            cell.parse::<f64>().map(Cell::Number).map_err(|_| {
                                CoreError::NumericParse {
                                    column: name.clone(),
                                    value: cell.clone(),
                                }
                            })
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_load_splits_target() {
        let file = write_csv(
            "Gender,Age,Obesity\n\
             Male,25,Normal_Weight\n\
             Female,31,Obesity_Type_I\n",
        );

        let dataset = Dataset::from_csv_path(file.path(), "Obesity").unwrap();
        assert_eq!(dataset.feature_names, ["Gender", "Age"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0], vec!["Male", "25"]);
        assert_eq!(dataset.labels, ["Normal_Weight", "Obesity_Type_I"]);
    }

    #[test]
    fn test_target_column_may_be_interior() {
        let file = write_csv(
            "Gender,Obesity,Age\n\
             Male,Normal_Weight,25\n",
        );

        let dataset = Dataset::from_csv_path(file.path(), "Obesity").unwrap();
        assert_eq!(dataset.feature_names, ["Gender", "Age"]);
        assert_eq!(dataset.rows[0], vec!["Male", "25"]);
        assert_eq!(dataset.labels, ["Normal_Weight"]);
    }

    #[test]
    fn test_missing_target_column() {
        let file = write_csv("Gender,Age\nMale,25\n");

        let err = Dataset::from_csv_path(file.path(), "Obesity").unwrap_err();
        assert!(matches!(err, CoreError::MissingTargetColumn(_)));
    }

    #[test]
    fn test_text_column_detection() {
        let dataset = Dataset::new(
            vec!["Gender".into(), "Age".into(), "Height".into()],
            vec![
                vec!["Male".into(), "25".into(), "1.70".into()],
                vec!["Female".into(), "31".into(), "1.62".into()],
            ],
            vec!["a".into(), "b".into()],
        );

        assert_eq!(dataset.text_columns(), ["Gender"]);
    }

    #[test]
    fn test_numeric_looking_text_column_stays_text() {
        // One non-numeric cell marks the whole column categorical.
        let dataset = Dataset::new(
            vec!["code".into()],
            vec![vec!["12".into()], vec!["n/a".into()]],
            vec!["a".into(), "b".into()],
        );

        assert_eq!(dataset.text_columns(), ["code"]);
    }

    #[test]
    fn test_typed_rows() {
        let dataset = Dataset::new(
            vec!["Gender".into(), "Age".into()],
            vec![vec!["Male".into(), "25".into()]],
            vec!["a".into()],
        );

        let rows = dataset.typed_rows(&dataset.text_columns()).unwrap();
        assert_eq!(
            rows,
            vec![vec![Cell::Text("Male".into()), Cell::Number(25.0)]]
        );
    }
}
