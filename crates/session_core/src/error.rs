use oracle::OracleError;
use shared::{
    domain::RecordId,
    error::{ApiError, ErrorCode, FeatureDomainError},
};
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("log in before submitting a prediction")]
    NotAuthenticated,
    #[error("prediction model is unavailable")]
    OracleUnavailable,
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error("prediction record {0} not found")]
    UnknownRecord(RecordId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SessionError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SessionError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotAuthenticated => ErrorCode::Unauthorized,
            SessionError::OracleUnavailable => ErrorCode::OracleUnavailable,
            SessionError::Validation { .. } => ErrorCode::Validation,
            SessionError::UnknownRecord(_) => ErrorCode::NotFound,
            SessionError::Oracle(_) | SessionError::Catalog(_) => ErrorCode::Internal,
        }
    }
}

impl From<FeatureDomainError> for SessionError {
    fn from(err: FeatureDomainError) -> Self {
        SessionError::validation(err.feature.name(), err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::new(err.code(), err.to_string())
    }
}
