use super::predictor::{FeatureScaler, Regressor};
use crate::domain::errors::PredictionError;
use crate::domain::ml::{FeatureRecord, FeatureSchema};
use tracing::debug;

/// Reindex → scale → predict over artifacts loaded once at startup.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
pub struct InferencePipeline {
    scaler: Box<dyn FeatureScaler>,
    model: Box<dyn Regressor>,
}

impl InferencePipeline {
    pub fn new(scaler: Box<dyn FeatureScaler>, model: Box<dyn Regressor>) -> Self {
        Self { scaler, model }
    }

    pub fn predict(
        &self,
        record: &FeatureRecord,
        schema: FeatureSchema,
    ) -> Result<f64, PredictionError> {
        let frame = record.reindex(schema)?;
        let scaled = self.scaler.transform(&frame)?;
        let prediction = self.model.predict(&scaled)?;
        if !prediction.is_finite() {
            return Err(PredictionError::ModelFailure {
                reason: format!("{} returned a non-finite value ({})", self.model.name(), prediction),
            });
        }

        debug!(
            "Predicted {} from {} fields ({:?} schema, {} missing)",
            prediction,
            record.len(),
            schema,
            frame.missing_count()
        );
        Ok(prediction)
    }

    pub fn scaler_name(&self) -> &str {
        self.scaler.name()
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}
