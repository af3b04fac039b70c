use crate::domain::errors::PredictionError;
use serde_json::Value;
use std::collections::HashMap;

/// Ordered column list for the JSON API.
/// This order MUST match the column order the scaler and model were fit on.
pub const JSON_FEATURE_NAMES: &[&str] = &[
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Ordered column list for the HTML form path.
/// `Population` is part of the schema but never collected from the form,
/// so it is always missing on this path.
pub const FORM_FEATURE_NAMES: &[&str] = &[
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Fields read from the submitted HTML form.
pub const FORM_FIELDS: &[&str] = &[
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Fixed column schema a record is reindexed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSchema {
    Json,
    Form,
}

impl FeatureSchema {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            FeatureSchema::Json => JSON_FEATURE_NAMES,
            FeatureSchema::Form => FORM_FEATURE_NAMES,
        }
    }
}

/// A single named input value before reindexing.
///
/// JSON values are kept raw until reindexing so that fields outside the
/// schema are dropped without ever being coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Missing,
    Raw(Value),
}

impl FeatureValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FeatureValue::Missing,
            Value::Number(n) => match n.as_f64() {
                Some(v) => FeatureValue::Number(v),
                None => FeatureValue::Raw(Value::Number(n)),
            },
            other => FeatureValue::Raw(other),
        }
    }

    /// Coerces the value to a float. Missing values become `NaN`.
    fn coerce(&self, feature: &str) -> Result<f64, PredictionError> {
        match self {
            FeatureValue::Number(v) => Ok(*v),
            FeatureValue::Missing => Ok(f64::NAN),
            FeatureValue::Raw(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Raw(Value::String(s)) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| PredictionError::NonNumeric {
                        feature: feature.to_string(),
                        value: s.clone(),
                    })
            }
            FeatureValue::Raw(Value::Number(n)) => {
                n.as_f64().ok_or_else(|| PredictionError::NonNumeric {
                    feature: feature.to_string(),
                    value: n.to_string(),
                })
            }
            FeatureValue::Raw(Value::Null) => Ok(f64::NAN),
            FeatureValue::Raw(Value::Array(_)) | FeatureValue::Raw(Value::Object(_)) => {
                Err(PredictionError::NestedValue {
                    feature: feature.to_string(),
                })
            }
        }
    }
}

/// Named housing features as received from a client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    values: HashMap<String, FeatureValue>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a decoded JSON body.
    /// A body that is not an object carries no named features.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| (name, FeatureValue::from_json(value)))
                .collect(),
            _ => Self::default(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Projects the record onto the schema's ordered columns.
    ///
    /// Names outside the schema are dropped; schema columns absent from the
    /// record become `NaN`.
    pub fn reindex(&self, schema: FeatureSchema) -> Result<FeatureFrame, PredictionError> {
        let columns = schema.columns();
        let values = columns
            .iter()
            .map(|&name| match self.values.get(name) {
                Some(value) => value.coerce(name),
                None => Ok(f64::NAN),
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(FeatureFrame { columns, values })
    }
}

impl FromIterator<(String, FeatureValue)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (String, FeatureValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One reindexed row, ready for scaling
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: &'static [&'static str],
    values: Vec<f64>,
}

impl FeatureFrame {
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn width(&self) -> usize {
        self.values.len()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}
