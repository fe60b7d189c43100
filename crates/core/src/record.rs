//! Patient record schema and wire-level validation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::encoding::Cell;
use crate::error::{FieldError, ValidationError};

/// The sixteen feature columns, in their declared wire order.
///
/// This order is baked into the trained pipeline; training and inference
/// must agree on it.
pub const COLUMNS: [&str; 16] = [
    "Gender",
    "Age",
    "Height",
    "Weight",
    "family_history",
    "FAVC",
    "FCVC",
    "NCP",
    "CAEC",
    "SMOKE",
    "CH2O",
    "SCC",
    "FAF",
    "TUE",
    "CALC",
    "MTRANS",
];

/// The seven diagnosis classes the model can emit.
pub const LABELS: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Overweight_Level_I",
    "Overweight_Level_II",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
];

/// One patient's lifestyle and anthropometric attributes
///
/// Categorical attributes are free strings; the vocabulary is deliberately
/// not checked here. The trained pipeline owns the fitted vocabulary and
/// rejects values it has never seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    pub family_history: String,
    #[serde(rename = "FAVC")]
    pub favc: String,
    #[serde(rename = "FCVC")]
    pub fcvc: u32,
    #[serde(rename = "NCP")]
    pub ncp: u32,
    #[serde(rename = "CAEC")]
    pub caec: String,
    #[serde(rename = "SMOKE")]
    pub smoke: String,
    #[serde(rename = "CH2O")]
    pub ch2o: u32,
    #[serde(rename = "SCC")]
    pub scc: String,
    #[serde(rename = "FAF")]
    pub faf: u32,
    #[serde(rename = "TUE")]
    pub tue: u32,
    #[serde(rename = "CALC")]
    pub calc: String,
    #[serde(rename = "MTRANS")]
    pub mtrans: String,
}

fn take_text(obj: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::new(field, "field is required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, "expected a string"));
            None
        }
    }
}

fn take_integer(obj: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<u32> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::new(field, "field is required"));
            None
        }
        Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                errors.push(FieldError::new(field, "expected a non-negative integer"));
                None
            }
        },
    }
}

fn take_float(obj: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::new(field, "field is required"));
            None
        }
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                errors.push(FieldError::new(field, "expected a number"));
                None
            }
        },
    }
}

impl PatientRecord {
    /// Validate a decoded JSON document against the record schema.
    ///
    /// Every field is checked in declared order and all problems are
    /// aggregated into one [`ValidationError`]. Unknown extra fields are
    /// ignored. Categorical vocabulary is not checked here.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return Err(ValidationError::single("body", "expected a JSON object")),
        };

        let mut errors = Vec::new();

        let gender = take_text(obj, "Gender", &mut errors);
        let age = take_integer(obj, "Age", &mut errors);
        let height = take_float(obj, "Height", &mut errors);
        let weight = take_float(obj, "Weight", &mut errors);
        let family_history = take_text(obj, "family_history", &mut errors);
        let favc = take_text(obj, "FAVC", &mut errors);
        let fcvc = take_integer(obj, "FCVC", &mut errors);
        let ncp = take_integer(obj, "NCP", &mut errors);
        let caec = take_text(obj, "CAEC", &mut errors);
        let smoke = take_text(obj, "SMOKE", &mut errors);
        let ch2o = take_integer(obj, "CH2O", &mut errors);
        let scc = take_text(obj, "SCC", &mut errors);
        let faf = take_integer(obj, "FAF", &mut errors);
        let tue = take_integer(obj, "TUE", &mut errors);
        let calc = take_text(obj, "CALC", &mut errors);
        let mtrans = take_text(obj, "MTRANS", &mut errors);

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        // Every accessor returned Some, or we bailed above.
        Ok(Self {
            gender: gender.unwrap(),
            age: age.unwrap(),
            height: height.unwrap(),
            weight: weight.unwrap(),
            family_history: family_history.unwrap(),
            favc: favc.unwrap(),
            fcvc: fcvc.unwrap(),
            ncp: ncp.unwrap(),
            caec: caec.unwrap(),
            smoke: smoke.unwrap(),
            ch2o: ch2o.unwrap(),
            scc: scc.unwrap(),
            faf: faf.unwrap(),
            tue: tue.unwrap(),
            calc: calc.unwrap(),
            mtrans: mtrans.unwrap(),
        })
    }

    /// Look up one attribute as a pipeline cell by its column name.
    pub fn cell(&self, column: &str) -> Option<Cell> {
        match column {
            "Gender" => Some(Cell::Text(self.gender.clone())),
            "Age" => Some(Cell::Number(f64::from(self.age))),
            "Height" => Some(Cell::Number(self.height)),
            "Weight" => Some(Cell::Number(self.weight)),
            "family_history" => Some(Cell::Text(self.family_history.clone())),
            "FAVC" => Some(Cell::Text(self.favc.clone())),
            "FCVC" => Some(Cell::Number(f64::from(self.fcvc))),
            "NCP" => Some(Cell::Number(f64::from(self.ncp))),
            "CAEC" => Some(Cell::Text(self.caec.clone())),
            "SMOKE" => Some(Cell::Text(self.smoke.clone())),
            "CH2O" => Some(Cell::Number(f64::from(self.ch2o))),
            "SCC" => Some(Cell::Text(self.scc.clone())),
            "FAF" => Some(Cell::Number(f64::from(self.faf))),
            "TUE" => Some(Cell::Number(f64::from(self.tue))),
            "CALC" => Some(Cell::Text(self.calc.clone())),
            "MTRANS" => Some(Cell::Text(self.mtrans.clone())),
            _ => None,
        }
    }
}
