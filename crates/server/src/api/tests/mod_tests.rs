use super::*;
use oracle::OracleError;

#[test]
fn error_codes_map_to_http_statuses() {
    assert_eq!(status_for(ErrorCode::Validation), StatusCode::BAD_REQUEST);
    assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
    assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
    assert_eq!(
        status_for(ErrorCode::OracleUnavailable),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        status_for(ErrorCode::RateLimited),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        status_for(ErrorCode::Internal),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn session_errors_keep_their_message() {
    let (status, Json(body)) = reject(SessionError::validation("email", "is required"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, ErrorCode::Validation);
    assert_eq!(body.message, "email: is required");

    let (status, Json(body)) = reject(SessionError::OracleUnavailable);
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.code, ErrorCode::OracleUnavailable);
}

#[test]
fn oracle_failures_are_internal() {
    let (status, Json(body)) = reject(SessionError::Oracle(OracleError::Inference(
        "non-finite probability NaN".into(),
    )));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.message.contains("inference failed"));
}

#[test]
fn unknown_record_is_not_found() {
    let (status, Json(body)) = reject(SessionError::UnknownRecord(RecordId::new()));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.code, ErrorCode::NotFound);
}
