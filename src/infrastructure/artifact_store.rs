//! Reads and writes the JSON artifacts produced by the training process.

use crate::domain::errors::ArtifactError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a JSON artifact from disk.
pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact = serde_json::from_slice(&content).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded artifact from {:?} ({} bytes)", path, content.len());
    Ok(artifact)
}

/// Write a JSON artifact to disk, creating parent directories as needed.
pub fn save_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<(), ArtifactError> {
    let io_err = |source: std::io::Error| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = serde_json::to_vec(artifact).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    // Atomic write: write to temp file then rename
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(io_err)?;
    fs::rename(&temp_path, path).map_err(io_err)?;

    info!("Saved artifact to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("artifact.json");

        let mut original = HashMap::new();
        original.insert("mean".to_string(), vec![1.0, 2.0]);
        save_artifact(&path, &original).unwrap();

        let loaded: HashMap<String, Vec<f64>> = load_artifact(&path).unwrap();
        assert_eq!(loaded, original);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<f64>, _> = load_artifact(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regmodel.pkl");
        std::fs::write(&path, b"\x80\x04\x95 not json").unwrap();

        let result: Result<Vec<f64>, _> = load_artifact(&path);
        assert!(matches!(result, Err(ArtifactError::Decode { .. })));
    }
}
