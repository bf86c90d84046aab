use crate::error::Result;
use crate::ml::classifier::GradientBoostedTrees;
use crate::ml::scaler::StandardScaler;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the persisted scaler blob
pub const SCALER_FILE: &str = "scaler.json";

/// File name of the persisted classifier blob
pub const CLASSIFIER_FILE: &str = "risk_model.json";

/// Fitted-artifact storage: two independently loadable JSON blobs under one
/// directory.
///
/// Writes go to a temporary file first and land via `rename`, so a reader
/// can never observe a half-written artifact. A missing blob is a normal
/// condition and loads as `None`; a corrupt one is an error.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save_scaler(&self, scaler: &StandardScaler) -> Result<()> {
        self.write_atomic(SCALER_FILE, scaler)
    }

    pub fn load_scaler(&self) -> Result<Option<StandardScaler>> {
        self.read_optional(SCALER_FILE)
    }

    pub fn save_classifier(&self, classifier: &GradientBoostedTrees) -> Result<()> {
        self.write_atomic(CLASSIFIER_FILE, classifier)
    }

    pub fn load_classifier(&self) -> Result<Option<GradientBoostedTrees>> {
        self.read_optional(CLASSIFIER_FILE)
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.blob_path(name);
        let tmp_path = self.dir.join(format!("{}.tmp", name));

        let bytes = serde_json::to_vec(value)?;
        std::fs::write(&tmp_path, bytes)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(path = %path.display(), "Artifact saved");
        Ok(())
    }

    fn read_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.blob_path(name);
        if !Path::new(&path).exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn test_missing_artifacts_load_as_none() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        assert!(store.load_scaler().unwrap().is_none());
        assert!(store.load_classifier().unwrap().is_none());
    }

    #[test]
    fn test_scaler_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        let features = array![[1.0, 4.0], [2.0, 8.0], [3.0, 12.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(&features).unwrap();

        store.save_scaler(&scaler).unwrap();
        let reloaded = store.load_scaler().unwrap().unwrap();

        let input = array![2.5, 9.0];
        let before = scaler.transform(&input).unwrap();
        let after = reloaded.transform(&input).unwrap();
        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        store.save_scaler(&StandardScaler::new()).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "tmp files remain: {:?}", leftovers);
    }

    #[test]
    fn test_corrupt_artifact_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        std::fs::write(dir.path().join(SCALER_FILE), b"not json").unwrap();
        assert!(store.load_scaler().is_err());
    }
}
