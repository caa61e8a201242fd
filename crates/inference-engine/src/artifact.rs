//! Persisted Model Artifacts

use crate::classifier::Classifier;
use crate::scaler::StandardScaler;
use crate::{ArtifactError, InferenceError};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Immutable scaler + classifier pair, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    scaler: StandardScaler,
    classifier: Classifier,
}

impl ModelArtifact {
    /// Assemble an artifact from already constructed parts
    pub fn new(scaler: StandardScaler, classifier: Classifier) -> Result<Self, ArtifactError> {
        classifier.validate()?;
        Ok(Self { scaler, classifier })
    }

    /// Load and validate both artifact files
    pub fn load(
        model_path: impl AsRef<Path>,
        scaler_path: impl AsRef<Path>,
    ) -> Result<Self, ArtifactError> {
        let model_path = model_path.as_ref();
        let scaler_path = scaler_path.as_ref();

        let classifier: Classifier = read_json(model_path)?;
        let scaler: StandardScaler = read_json(scaler_path)?;
        let artifact = Self::new(scaler, classifier)?;

        info!(
            "Loaded model artifact: {} from {}, scaler from {}",
            artifact.classifier.describe(),
            model_path.display(),
            scaler_path.display()
        );
        Ok(artifact)
    }

    /// Scale a feature vector and return the positive-class probability
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let scaled = self.scaler.transform(features)?;
        self.classifier.predict_proba(&scaled)
    }

    /// Trained classifier
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
