use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use session_core::PredictionWorkflow;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod registry;

use app_state::AppState;
use config::load_settings;
use registry::SessionRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let workflow = PredictionWorkflow::from_load_result(oracle::load_oracle(&settings.model_path));
    if !workflow.is_available() {
        error!(
            model_path = %settings.model_path.display(),
            "prediction model failed to load; predictions are disabled until it is fixed and the server restarted"
        );
    }

    let state = AppState {
        registry: SessionRegistry::new(
            settings.max_sessions,
            Duration::from_secs(settings.session_idle_secs),
        ),
        workflow,
    };
    let app = build_router(Arc::new(state), settings.body_limit_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        .route("/oracle", get(api::oracle_status))
        .route("/sessions", post(api::create_session))
        .route(
            "/sessions/:id",
            get(api::get_session).delete(api::delete_session),
        )
        .route("/sessions/:id/navigate", post(api::navigate))
        .route("/sessions/:id/login", post(api::login))
        .route("/sessions/:id/logout", post(api::logout))
        .route("/sessions/:id/reset", post(api::request_reset))
        .route("/sessions/:id/reset/confirm", post(api::confirm_reset))
        .route("/sessions/:id/reset/cancel", post(api::cancel_reset))
        .route(
            "/sessions/:id/preferences",
            axum::routing::patch(api::update_preferences),
        )
        .route(
            "/sessions/:id/predictions",
            post(api::submit_prediction).get(api::list_predictions),
        )
        .route(
            "/sessions/:id/predictions/:record_id/report",
            get(api::download_report),
        )
        .route("/locales/:locale", get(api::get_locale))
        .route("/themes/:theme", get(api::get_theme))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
