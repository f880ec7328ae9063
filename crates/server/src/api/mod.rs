//! HTTP handlers. Every mutating route answers with the refreshed
//! [`SessionView`] so the render layer redraws exactly once per intent.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use session_core::{
    catalog, render_report, LocaleTable, NavigationOutcome, Palette, SessionError,
    REPORT_CONTENT_TYPE, REPORT_FILE_NAME,
};
use shared::{
    domain::{LocaleId, PredictionRecord, RecordId, SessionId, ThemeId},
    error::{ApiError, ErrorCode},
    protocol::{
        LoginRequest, NavigateRequest, OracleStatus, PredictionForm, PreferencesPatch, SessionView,
    },
};
use tracing::{debug, error};

use crate::{app_state::AppState, registry::SessionHandle};

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::OracleUnavailable | ErrorCode::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: SessionError) -> (StatusCode, Json<ApiError>) {
    let api: ApiError = err.into();
    (status_for(api.code), Json(api))
}

fn failure(code: ErrorCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status_for(code), Json(ApiError::new(code, message)))
}

/// `Json` whose rejections use the [`ApiError`] body. Axum's status is kept
/// (415 for a missing content type, 422 for values that do not fit the type).
pub(crate) struct ApiJson<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiError>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                rejection.status(),
                Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
            )),
        }
    }
}

async fn lookup(state: &AppState, id: SessionId) -> ApiResult<SessionHandle> {
    state
        .registry
        .get(id)
        .await
        .ok_or_else(|| failure(ErrorCode::NotFound, "session not found"))
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn oracle_status(State(state): State<Arc<AppState>>) -> Json<OracleStatus> {
    Json(state.workflow.status())
}

pub(crate) async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let (id, handle) = state.registry.create().await.map_err(|full| {
        failure(
            ErrorCode::RateLimited,
            format!("session limit of {} reached", full.capacity),
        )
    })?;
    let session = handle.lock().await;
    Ok((
        StatusCode::CREATED,
        Json(session.view(id, state.workflow.status())),
    ))
}

pub(crate) async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<StatusCode> {
    if state.registry.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(failure(ErrorCode::NotFound, "session not found"))
    }
}

pub(crate) async fn navigate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    ApiJson(req): ApiJson<NavigateRequest>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    if session.go_to(req.page) == NavigationOutcome::Ignored {
        debug!(session_id = %id, page = ?req.page, "unreachable page requested");
    }
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    session
        .log_in(&req.name, &req.email, &req.password)
        .map_err(reject)?;
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn logout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    session.log_out();
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn request_reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    session.request_reset();
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn confirm_reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    if !session.confirm_reset() {
        debug!(session_id = %id, "reset confirmation without pending request");
    }
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn cancel_reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    session.cancel_reset();
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    ApiJson(patch): ApiJson<PreferencesPatch>,
) -> ApiResult<Json<SessionView>> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    // Font size is the only fallible field; apply it first so a rejected
    // patch changes nothing.
    if let Some(font_size) = patch.font_size {
        session.set_font_size(font_size).map_err(reject)?;
    }
    if let Some(theme) = patch.theme {
        session.set_theme(theme);
    }
    if let Some(locale) = patch.locale {
        session.set_locale(locale);
    }
    if let Some(enabled) = patch.clear_history_on_logout {
        session.set_clear_history_on_logout(enabled);
    }
    Ok(Json(session.view(id, state.workflow.status())))
}

pub(crate) async fn submit_prediction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    ApiJson(form): ApiJson<PredictionForm>,
) -> ApiResult<(StatusCode, Json<PredictionRecord>)> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock_owned().await;
    let workflow = state.workflow.clone();
    let record = tokio::task::spawn_blocking(move || workflow.submit(&mut session, &form))
        .await
        .map_err(|join_error| {
            error!(session_id = %id, %join_error, "prediction task failed");
            failure(ErrorCode::Internal, "prediction task failed")
        })?
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn list_predictions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<Vec<PredictionRecord>>> {
    let handle = lookup(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(session.history().to_vec()))
}

pub(crate) async fn download_report(
    State(state): State<Arc<AppState>>,
    Path((id, record_id)): Path<(SessionId, RecordId)>,
) -> ApiResult<impl IntoResponse> {
    let handle = lookup(&state, id).await?;
    let session = handle.lock().await;
    let record = session.find_record(record_id).map_err(reject)?;
    let table = catalog::locale(session.preferences().locale)
        .map_err(|e| reject(SessionError::from(e)))?;
    let text = render_report(record, table);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(REPORT_CONTENT_TYPE),
    );
    if let Ok(value) =
        HeaderValue::from_str(&format!("attachment; filename=\"{REPORT_FILE_NAME}\""))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok((StatusCode::OK, headers, text))
}

pub(crate) async fn get_locale(
    Path(locale): Path<LocaleId>,
) -> ApiResult<Json<&'static LocaleTable>> {
    catalog::locale(locale)
        .map(Json)
        .map_err(|e| reject(SessionError::from(e)))
}

pub(crate) async fn get_theme(Path(theme): Path<ThemeId>) -> Json<Palette> {
    Json(catalog::palette(theme))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
