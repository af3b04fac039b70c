use crate::application::ml::predictor::{FeatureScaler, Regressor};
use crate::domain::errors::PredictionError;
use crate::domain::ml::FeatureFrame;

/// Identity scaler accepting rows of any width.
#[derive(Debug, Clone, Default)]
pub struct MockScaler;

impl MockScaler {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureScaler for MockScaler {
    fn transform(&self, frame: &FeatureFrame) -> Result<Vec<f64>, PredictionError> {
        Ok(frame.values().to_vec())
    }

    fn name(&self) -> &str {
        "MockScaler"
    }
}

/// Deterministic regressor: `intercept + sum(finite inputs)`.
///
/// Missing values are skipped instead of rejected, so rows with unfilled
/// columns still produce a price.
#[derive(Debug, Clone)]
pub struct MockRegressor {
    intercept: f64,
    failure: Option<String>,
}

impl MockRegressor {
    pub fn new(intercept: f64) -> Self {
        Self {
            intercept,
            failure: None,
        }
    }

    /// A regressor whose every prediction fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            intercept: 0.0,
            failure: Some(reason.into()),
        }
    }
}

impl Regressor for MockRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        if let Some(reason) = &self.failure {
            return Err(PredictionError::ModelFailure {
                reason: reason.clone(),
            });
        }
        Ok(self.intercept + row.iter().filter(|v| v.is_finite()).sum::<f64>())
    }

    fn name(&self) -> &str {
        "MockRegressor"
    }
}
