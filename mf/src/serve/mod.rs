//! `mf serve` - HTTP JSON API for the journaling frontend
//!
//! Endpoints:
//! - GET  /health                    - liveness
//! - POST /transcripts/add           - store a voice-session transcript
//! - GET  /transcripts               - all transcripts
//! - GET  /transcripts/{session_id}  - transcripts for one session (404 when none)
//! - POST /journals/add              - store a journal entry
//! - GET  /journals                  - all journal entries
//! - POST /gameplan/analyze          - run the synthesis pipeline now
//! - GET  /gameplans                 - prior game plans, newest first (404 when none)
//! - POST /emotions/add              - log a mood entry
//! - GET  /emotions                  - the mood log
//! - POST /clear                     - delete everything
//!
//! All responses are JSON; errors are `{"error": "..."}`.

mod handlers;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use mindstore::{Store, StoreError};

use crate::error::Error;
use crate::pipeline::Synthesizer;

use self::handlers::{
    handle_add_emotion, handle_add_journal, handle_add_transcript, handle_analyze, handle_clear, handle_health,
    handle_list_emotions, handle_list_game_plans, handle_list_journals, handle_list_transcripts, handle_not_found,
    handle_transcripts_by_session,
};

/// State shared across request handlers
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub synthesizer: Synthesizer,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, synthesizer: Synthesizer) -> Self {
        Self { store, synthesizer }
    }
}

/// JSON error response with the given status
fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Invalid input is the caller's fault; anything else is the store's
fn store_error(err: StoreError) -> Response {
    warn!(error = %err, "store_error: request failed");
    let status = if err.is_invalid() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_error(status, &err.to_string())
}

/// Pipeline failure with its kind-specific status
fn pipeline_error(err: Error) -> Response {
    warn!(kind = %err.kind(), error = %err, "pipeline_error: synthesis failed");
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
        "error": err.to_string(),
        "kind": err.kind().to_string(),
        "retryable": err.is_retryable(),
    });
    (status, Json(body)).into_response()
}

/// Build the API router
///
/// CORS is permissive so a browser frontend on another origin can call it.
pub fn router(state: AppState) -> Router {
    debug!("router: called");
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/transcripts/add", post(handle_add_transcript))
        .route("/transcripts", get(handle_list_transcripts))
        .route("/transcripts/{session_id}", get(handle_transcripts_by_session))
        .route("/journals/add", post(handle_add_journal))
        .route("/journals", get(handle_list_journals))
        .route("/gameplan/analyze", post(handle_analyze))
        .route("/gameplans", get(handle_list_game_plans))
        .route("/emotions/add", post(handle_add_emotion))
        .route("/emotions", get(handle_list_emotions))
        .route("/clear", post(handle_clear))
        .fallback(handle_not_found)
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serve the API on `bind` until Ctrl+C
pub async fn start_server(bind: &str, state: AppState) -> Result<()> {
    debug!(%bind, "start_server: called");
    let listener = TcpListener::bind(bind)
        .await
        .context(format!("Failed to bind {}", bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!(%addr, "mindful API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "shutdown_signal: failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
