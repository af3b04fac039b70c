use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a feature record into a prediction.
///
/// Messages are surfaced verbatim in the `{"error": ...}` payload of the JSON
/// endpoint, so they read like the numeric stack's own diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Failed to decode JSON object: {reason}")]
    InvalidPayload { reason: String },

    #[error("could not convert string to float: '{value}'")]
    NonNumeric { feature: String, value: String },

    #[error("setting an array element with a sequence.")]
    NestedValue { feature: String },

    #[error("X has {actual} features, but {estimator} is expecting {expected} features as input.")]
    FeatureCountMismatch {
        estimator: String,
        actual: usize,
        expected: usize,
    },

    #[error(
        "The feature names should match those that were passed during fit.\n{}",
        describe_name_drift(.expected, .actual)
    )]
    FeatureNamesMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Input X contains NaN.")]
    MissingValue,

    #[error("Input X contains infinity or a value too large for dtype('float64').")]
    InfiniteValue,

    #[error("Prediction failed: {reason}")]
    ModelFailure { reason: String },
}

/// Lists names unseen at fit time and names missing now; when the sets agree
/// only the order differs.
fn describe_name_drift(expected: &[String], actual: &[String]) -> String {
    let unseen: Vec<&String> = actual.iter().filter(|n| !expected.contains(*n)).collect();
    let missing: Vec<&String> = expected.iter().filter(|n| !actual.contains(*n)).collect();

    if unseen.is_empty() && missing.is_empty() {
        return "Feature names must be in the same order as they were in fit.\n".to_string();
    }

    let mut out = String::new();
    if !unseen.is_empty() {
        out.push_str("Feature names unseen at fit time:\n");
        for name in unseen {
            out.push_str(&format!("- {}\n", name));
        }
    }
    if !missing.is_empty() {
        out.push_str("Feature names seen at fit time, yet now missing:\n");
        for name in missing {
            out.push_str(&format!("- {}\n", name));
        }
    }
    out
}

/// Errors raised while loading the persisted scaler and model artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed artifact {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid artifact {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count_mismatch_formatting() {
        let error = PredictionError::FeatureCountMismatch {
            estimator: "StandardScaler".to_string(),
            actual: 8,
            expected: 7,
        };

        let msg = error.to_string();
        assert_eq!(
            msg,
            "X has 8 features, but StandardScaler is expecting 7 features as input."
        );
    }

    #[test]
    fn test_non_numeric_formatting() {
        let error = PredictionError::NonNumeric {
            feature: "MedInc".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "could not convert string to float: 'abc'");
    }

    #[test]
    fn test_artifact_error_mentions_path() {
        let error = ArtifactError::Invalid {
            path: PathBuf::from("models/scaler.json"),
            reason: "mean is empty".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("models/scaler.json"));
        assert!(msg.contains("mean is empty"));
    }

    #[test]
    fn test_feature_names_mismatch_lists_unseen_and_missing() {
        let error = PredictionError::FeatureNamesMismatch {
            expected: vec!["MedInc".to_string(), "HouseAge".to_string()],
            actual: vec!["MedInc".to_string(), "Population".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "The feature names should match those that were passed during fit.\n\
             Feature names unseen at fit time:\n- Population\n\
             Feature names seen at fit time, yet now missing:\n- HouseAge\n"
        );
    }

    #[test]
    fn test_feature_names_mismatch_order_only() {
        let error = PredictionError::FeatureNamesMismatch {
            expected: vec!["MedInc".to_string(), "HouseAge".to_string()],
            actual: vec!["HouseAge".to_string(), "MedInc".to_string()],
        };

        assert!(
            error
                .to_string()
                .ends_with("Feature names must be in the same order as they were in fit.\n")
        );
    }
}
