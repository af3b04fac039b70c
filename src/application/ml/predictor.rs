use crate::domain::errors::PredictionError;
use crate::domain::ml::FeatureFrame;

/// Pre-fit transform applied to a reindexed row before prediction
pub trait FeatureScaler: Send + Sync {
    /// Standardize one row. Missing values (`NaN`) pass through.
    fn transform(&self, frame: &FeatureFrame) -> Result<Vec<f64>, PredictionError>;

    /// Get scaler name/type
    fn name(&self) -> &str;
}

/// Interface for the pre-fit regression model
pub trait Regressor: Send + Sync {
    /// Predict a single scalar from a standardized row
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
