pub mod pipeline;
pub mod predictor;
pub mod scaler;
pub mod smartcore_predictor;

pub use pipeline::InferencePipeline;
pub use predictor::{FeatureScaler, Regressor};
pub use scaler::StandardScaler;
pub use smartcore_predictor::{Estimator, ModelArtifact, SmartCoreRegressor};
