use super::predictor::FeatureScaler;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ml::FeatureFrame;
use crate::infrastructure::artifact_store::load_artifact;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Per-column standardization fit by the training process.
///
/// `z = (x - mean) / scale`. A zero scale (constant column at fit time) is
/// treated as `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    /// Column names seen at fit time, if the scaler was fit on named columns
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            mean,
            scale,
            feature_names: None,
        }
    }

    pub fn with_feature_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Load and validate a scaler artifact.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let scaler: Self = load_artifact(path)?;
        scaler.validate().map_err(|reason| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        info!(
            "Successfully loaded StandardScaler from {:?} ({} features)",
            path,
            scaler.n_features_in()
        );
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("mean is empty".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(format!(
                    "{} feature names for {} features",
                    names.len(),
                    self.mean.len()
                ));
            }
        }
        Ok(())
    }

    pub fn n_features_in(&self) -> usize {
        self.mean.len()
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, frame: &FeatureFrame) -> Result<Vec<f64>, PredictionError> {
        // Names are checked before width, so a wider frame reports the unseen columns.
        if let Some(names) = &self.feature_names {
            if !names.iter().eq(frame.columns().iter()) {
                return Err(PredictionError::FeatureNamesMismatch {
                    expected: names.clone(),
                    actual: frame.columns().iter().map(|c| c.to_string()).collect(),
                });
            }
        }

        if frame.width() != self.n_features_in() {
            return Err(PredictionError::FeatureCountMismatch {
                estimator: self.name().to_string(),
                actual: frame.width(),
                expected: self.n_features_in(),
            });
        }

        Ok(frame
            .values()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }

    fn name(&self) -> &str {
        "StandardScaler"
    }
}
