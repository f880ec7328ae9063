//! Contract with the externally trained classifier and the loader for its
//! on-disk artifact.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use shared::domain::FeatureVector;
use thiserror::Error;
use tracing::info;

mod logistic;

pub use logistic::{LogisticModel, ModelArtifact, Scaler, LOGISTIC_KIND};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Either 0 (low risk) or 1 (high risk).
    pub class: u8,
    /// Probability mass on `class`.
    pub confidence: f64,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("model artifact not found at {}", path.display())]
    ArtifactMissing { path: PathBuf },
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("model artifact {} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Opaque predictor. Implementations are immutable after load and shared
/// read-only across sessions.
pub trait PredictionOracle: Send + Sync {
    fn predict_with_confidence(&self, features: &FeatureVector) -> Result<Prediction, OracleError>;
}

pub fn load_oracle(path: impl AsRef<Path>) -> Result<Arc<dyn PredictionOracle>, OracleError> {
    let model = load_model(path)?;
    Ok(Arc::new(model))
}

pub fn load_model(path: impl AsRef<Path>) -> Result<LogisticModel, OracleError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            OracleError::ArtifactMissing {
                path: path.to_path_buf(),
            }
        } else {
            OracleError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&raw).map_err(|source| OracleError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    let model = LogisticModel::from_artifact(artifact)?;
    info!(path = %path.display(), "loaded prediction model");
    Ok(model)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
