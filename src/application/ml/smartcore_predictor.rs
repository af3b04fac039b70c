use super::predictor::Regressor;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::infrastructure::artifact_store::load_artifact;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;
use std::path::Path;
use tracing::info;

pub type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Fitted smartcore estimator, tagged by kind in the artifact.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearModel),
    RandomForest(ForestModel),
}

impl Estimator {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>, smartcore::error::Failed> {
        match self {
            Estimator::Linear(model) => model.predict(x),
            Estimator::RandomForest(model) => model.predict(x),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Estimator::Linear(_) => "LinearRegression",
            Estimator::RandomForest(_) => "RandomForestRegressor",
        }
    }
}

/// On-disk model envelope: the estimator plus the row width it was fit on.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    pub n_features_in: usize,
    pub estimator: Estimator,
}

pub struct SmartCoreRegressor {
    artifact: ModelArtifact,
}

impl SmartCoreRegressor {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Load the regression model persisted by the training process.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = load_artifact(path)?;
        if artifact.n_features_in == 0 {
            return Err(ArtifactError::Invalid {
                path: path.to_path_buf(),
                reason: "n_features_in must be positive".to_string(),
            });
        }

        info!(
            "Successfully loaded {} from {:?} ({} features)",
            artifact.estimator.name(),
            path,
            artifact.n_features_in
        );
        Ok(Self::new(artifact))
    }

    pub fn n_features_in(&self) -> usize {
        self.artifact.n_features_in
    }
}

impl Regressor for SmartCoreRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        if row.len() != self.artifact.n_features_in {
            return Err(PredictionError::FeatureCountMismatch {
                estimator: self.name().to_string(),
                actual: row.len(),
                expected: self.artifact.n_features_in,
            });
        }
        if row.iter().any(|v| v.is_nan()) {
            return Err(PredictionError::MissingValue);
        }
        if row.iter().any(|v| v.is_infinite()) {
            return Err(PredictionError::InfiniteValue);
        }

        let input_matrix = DenseMatrix::from_2d_vec(&vec![row.to_vec()]).map_err(|e| {
            PredictionError::ModelFailure {
                reason: format!("Matrix creation failed: {}", e),
            }
        })?;

        let predictions =
            self.artifact
                .estimator
                .predict(&input_matrix)
                .map_err(|e| PredictionError::ModelFailure {
                    reason: e.to_string(),
                })?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::ModelFailure {
                reason: "No prediction returned".to_string(),
            })
    }

    fn name(&self) -> &str {
        self.artifact.estimator.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::artifact_store::save_artifact;
    use smartcore::ensemble::random_forest_regressor::RandomForestRegressorParameters;
    use smartcore::linear::linear_regression::LinearRegressionParameters;

    const COEFFICIENTS: [f64; 3] = [2.0, -1.0, 0.5];
    const INTERCEPT: f64 = 4.0;

    fn training_set() -> (DenseMatrix<f64>, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                (0..3)
                    .map(|j| ((i * 3 + j) as f64 * 1.3).sin() * 10.0)
                    .collect()
            })
            .collect();
        let targets = rows
            .iter()
            .map(|r| INTERCEPT + r.iter().zip(COEFFICIENTS).map(|(x, c)| x * c).sum::<f64>())
            .collect();
        (DenseMatrix::from_2d_vec(&rows).unwrap(), targets)
    }

    fn linear_regressor() -> SmartCoreRegressor {
        let (x, y) = training_set();
        let model = LinearRegression::fit(&x, &y, LinearRegressionParameters::default()).unwrap();
        SmartCoreRegressor::new(ModelArtifact {
            n_features_in: 3,
            estimator: Estimator::Linear(model),
        })
    }

    #[test]
    fn test_linear_prediction_recovers_fit() {
        let regressor = linear_regressor();

        let prediction = regressor.predict(&[1.0, 2.0, 3.0]).unwrap();
        let expected = INTERCEPT + 2.0 - 2.0 + 1.5;
        assert!((prediction - expected).abs() < 1e-6);
        assert_eq!(regressor.name(), "LinearRegression");
    }

    #[test]
    fn test_rejects_missing_and_infinite_values() {
        let regressor = linear_regressor();

        assert_eq!(
            regressor.predict(&[1.0, f64::NAN, 3.0]),
            Err(PredictionError::MissingValue)
        );
        assert_eq!(
            regressor.predict(&[1.0, f64::INFINITY, 3.0]),
            Err(PredictionError::InfiniteValue)
        );
    }

    #[test]
    fn test_rejects_wrong_width() {
        let regressor = linear_regressor();

        let err = regressor.predict(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "X has 2 features, but LinearRegression is expecting 3 features as input."
        );
    }

    #[test]
    fn test_random_forest_artifact_roundtrip_through_disk() {
        let (x, y) = training_set();
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(5)
            .with_max_depth(4);
        let model = RandomForestRegressor::fit(&x, &y, params).unwrap();
        let artifact = ModelArtifact {
            n_features_in: 3,
            estimator: Estimator::RandomForest(model),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regmodel.json");
        save_artifact(&path, &artifact).unwrap();

        let regressor = SmartCoreRegressor::load(&path).unwrap();
        assert_eq!(regressor.name(), "RandomForestRegressor");
        assert_eq!(regressor.n_features_in(), 3);
        assert!(regressor.predict(&[0.0, 0.0, 0.0]).unwrap().is_finite());
    }

    #[test]
    fn test_zero_width_artifact_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regmodel.json");
        let (x, y) = training_set();
        let model = LinearRegression::fit(&x, &y, LinearRegressionParameters::default()).unwrap();
        save_artifact(
            &path,
            &ModelArtifact {
                n_features_in: 0,
                estimator: Estimator::Linear(model),
            },
        )
        .unwrap();

        assert!(matches!(
            SmartCoreRegressor::load(&path),
            Err(ArtifactError::Invalid { .. })
        ));
    }
}
