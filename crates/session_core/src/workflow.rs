use std::sync::Arc;

use chrono::{DateTime, Utc};
use oracle::{OracleError, PredictionOracle};
use shared::{
    domain::{PredictionRecord, RecordId},
    protocol::{OracleStatus, PredictionForm},
};
use tracing::{info, warn};

use crate::{options::decode_form, Session, SessionError};

/// Runs form submissions against the process-wide oracle. The oracle may be
/// absent when its artifact failed to load; every submit re-checks.
#[derive(Clone, Default)]
pub struct PredictionWorkflow {
    oracle: Option<Arc<dyn PredictionOracle>>,
    load_error: Option<String>,
}

impl PredictionWorkflow {
    pub fn new(oracle: Arc<dyn PredictionOracle>) -> Self {
        Self {
            oracle: Some(oracle),
            load_error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            oracle: None,
            load_error: Some(reason.into()),
        }
    }

    pub fn from_load_result(result: Result<Arc<dyn PredictionOracle>, OracleError>) -> Self {
        match result {
            Ok(oracle) => Self::new(oracle),
            Err(err) => {
                warn!(error = %err, "prediction model unavailable");
                Self::unavailable(err.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn status(&self) -> OracleStatus {
        OracleStatus {
            available: self.is_available(),
            message: self.load_error.clone(),
        }
    }

    pub fn submit(
        &self,
        session: &mut Session,
        form: &PredictionForm,
    ) -> Result<PredictionRecord, SessionError> {
        self.submit_at(session, form, Utc::now())
    }

    /// Only signed-in sessions may predict. The session is only touched
    /// after the oracle has answered with a well-formed prediction.
    pub fn submit_at(
        &self,
        session: &mut Session,
        form: &PredictionForm,
        now: DateTime<Utc>,
    ) -> Result<PredictionRecord, SessionError> {
        if !session.authenticated() {
            return Err(SessionError::NotAuthenticated);
        }
        let features = decode_form(form)?;
        let Some(oracle) = self.oracle.as_deref() else {
            warn!("prediction submitted while model is unavailable");
            return Err(SessionError::OracleUnavailable);
        };

        let prediction = oracle.predict_with_confidence(&features)?;
        if prediction.class > 1 {
            return Err(OracleError::Inference(format!(
                "unexpected class {}",
                prediction.class
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&prediction.confidence) {
            return Err(OracleError::Inference(format!(
                "confidence {} outside [0, 1]",
                prediction.confidence
            ))
            .into());
        }

        let record = PredictionRecord {
            id: RecordId::new(),
            identity: session.identity().to_string(),
            timestamp: now,
            is_high_risk: prediction.class == 1,
            confidence: prediction.confidence,
            features,
        };
        session.commit_prediction(record.clone());
        info!(
            record_id = %record.id,
            is_high_risk = record.is_high_risk,
            confidence = record.confidence,
            "prediction recorded"
        );
        Ok(record)
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
