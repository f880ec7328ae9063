use serde::{Deserialize, Serialize};
use shared::domain::{Feature, FeatureVector, FEATURE_COUNT};

use crate::{OracleError, Prediction, PredictionOracle};

pub const LOGISTIC_KIND: &str = "logistic_regression";

const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Serialized form of a trained binary classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub kind: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Scaler>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl LogisticModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, OracleError> {
        if artifact.kind != LOGISTIC_KIND {
            return Err(OracleError::InvalidArtifact(format!(
                "unsupported model kind '{}'",
                artifact.kind
            )));
        }

        let expected: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        if artifact.feature_names != expected {
            return Err(OracleError::InvalidArtifact(format!(
                "feature_names must be {expected:?}, got {:?}",
                artifact.feature_names
            )));
        }

        let coefficients = fixed("coefficients", &artifact.coefficients)?;
        if !artifact.intercept.is_finite() {
            return Err(OracleError::InvalidArtifact(
                "intercept must be finite".into(),
            ));
        }

        let (mean, scale) = match &artifact.scaler {
            Some(scaler) => {
                let mean = fixed("scaler.mean", &scaler.mean)?;
                let scale = fixed("scaler.scale", &scaler.scale)?;
                if scale.iter().any(|s| *s == 0.0) {
                    return Err(OracleError::InvalidArtifact(
                        "scaler.scale entries must be non-zero".into(),
                    ));
                }
                (mean, scale)
            }
            None => ([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]),
        };

        Ok(Self {
            coefficients,
            intercept: artifact.intercept,
            mean,
            scale,
        })
    }

    /// Probability of the high-risk class.
    pub fn probability_high_risk(&self, features: &FeatureVector) -> f64 {
        let z = features
            .to_array()
            .iter()
            .enumerate()
            .fold(self.intercept, |acc, (i, x)| {
                acc + self.coefficients[i] * (x - self.mean[i]) / self.scale[i]
            });
        sigmoid(z)
    }
}

impl PredictionOracle for LogisticModel {
    fn predict_with_confidence(&self, features: &FeatureVector) -> Result<Prediction, OracleError> {
        let p1 = self.probability_high_risk(features);
        if !p1.is_finite() {
            return Err(OracleError::Inference(format!(
                "non-finite probability {p1}"
            )));
        }
        let prediction = if p1 >= DECISION_THRESHOLD {
            Prediction {
                class: 1,
                confidence: p1,
            }
        } else {
            Prediction {
                class: 0,
                confidence: 1.0 - p1,
            }
        };
        Ok(prediction)
    }
}

fn fixed(name: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], OracleError> {
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        OracleError::InvalidArtifact(format!(
            "{name} must have {FEATURE_COUNT} entries, got {}",
            values.len()
        ))
    })?;
    if array.iter().any(|v| !v.is_finite()) {
        return Err(OracleError::InvalidArtifact(format!(
            "{name} entries must be finite"
        )));
    }
    Ok(array)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
