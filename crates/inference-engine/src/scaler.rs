//! Feature Standardization

use crate::{ArtifactError, InferenceError};
use feature_engine::{FEATURE_DIMENSION, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

/// On-disk scaler layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSpec {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Standardization fitted on the training data: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerSpec", into = "ScalerSpec")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler for the 12-feature model input.
    ///
    /// A zero scale marks a constant training column and is replaced by 1.0.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        if mean.len() != FEATURE_DIMENSION || scale.len() != FEATURE_DIMENSION {
            return Err(ArtifactError::Invalid(format!(
                "scaler expects {} features, got mean={} scale={}",
                FEATURE_DIMENSION,
                mean.len(),
                scale.len()
            )));
        }

        if let Some(idx) = mean.iter().chain(scale.iter()).position(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid(format!(
                "scaler contains a non-finite value ({})",
                FEATURE_NAMES[idx % FEATURE_DIMENSION]
            )));
        }

        if let Some(idx) = scale.iter().position(|s| *s < 0.0) {
            return Err(ArtifactError::Invalid(format!(
                "scaler has a negative scale for {}",
                FEATURE_NAMES[idx]
            )));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self { mean, scale })
    }

    /// Identity transform, mostly useful in tests
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_DIMENSION],
            scale: vec![1.0; FEATURE_DIMENSION],
        }
    }

    /// Standardize one feature vector
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.mean.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    /// Per-feature means
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Per-feature scales
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl TryFrom<ScalerSpec> for StandardScaler {
    type Error = ArtifactError;

    fn try_from(spec: ScalerSpec) -> Result<Self, Self::Error> {
        if let Some(names) = &spec.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(ArtifactError::Invalid(format!(
                    "scaler feature order {:?} does not match model input {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }
        Self::new(spec.mean, spec.scale)
    }
}

impl From<StandardScaler> for ScalerSpec {
    fn from(scaler: StandardScaler) -> Self {
        Self {
            feature_names: Some(FEATURE_NAMES.iter().map(|n| n.to_string()).collect()),
            mean: scaler.mean,
            scale: scaler.scale,
        }
    }
}
