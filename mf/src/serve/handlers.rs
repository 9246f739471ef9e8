//! HTTP route handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mindstore::{CorpusStore, EmotionStore, GamePlanStore, Store};
use serde::Deserialize;
use tracing::debug;

use super::{AppState, json_error, pipeline_error, store_error};
use crate::pipeline::run_blocking;

/// POST /transcripts/add body
#[derive(Debug, Deserialize)]
pub(crate) struct AddTranscriptRequest {
    session_id: String,
    transcript: String,
}

/// POST /journals/add body
#[derive(Debug, Deserialize)]
pub(crate) struct AddJournalRequest {
    content: String,
}

/// POST /emotions/add body
#[derive(Debug, Deserialize)]
pub(crate) struct AddEmotionRequest {
    date: String,
    emotion: String,
}

fn bad_payload(rejection: JsonRejection) -> Response {
    debug!(error = %rejection, "bad_payload: rejected request body");
    json_error(StatusCode::BAD_REQUEST, &format!("invalid JSON payload: {}", rejection.body_text()))
}

/// Fallback handler for unmatched routes
pub(crate) async fn handle_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> Response {
    let body = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /transcripts/add
pub(crate) async fn handle_add_transcript(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddTranscriptRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return bad_payload(rejection),
    };
    debug!(session_id = %req.session_id, "handle_add_transcript: called");

    let store = state.store.clone();
    match run_blocking(move || store.add_transcript(&req.session_id, &req.transcript)).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => store_error(e),
    }
}

/// GET /transcripts
pub(crate) async fn handle_list_transcripts(State(state): State<Arc<AppState>>) -> Response {
    debug!("handle_list_transcripts: called");
    let store = state.store.clone();
    match run_blocking(move || store.fetch_transcripts()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => store_error(e),
    }
}

/// GET /transcripts/{session_id}
pub(crate) async fn handle_transcripts_by_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Response {
    debug!(%session_id, "handle_transcripts_by_session: called");
    let store = state.store.clone();
    let session = session_id.clone();
    match run_blocking(move || store.transcripts_by_session(&session)).await {
        Ok(records) if records.is_empty() => json_error(
            StatusCode::NOT_FOUND,
            &format!("no transcripts for session '{}'", session_id),
        ),
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => store_error(e),
    }
}

/// POST /journals/add
pub(crate) async fn handle_add_journal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddJournalRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return bad_payload(rejection),
    };
    debug!(content_len = req.content.len(), "handle_add_journal: called");

    let store = state.store.clone();
    match run_blocking(move || store.add_journal(&req.content)).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => store_error(e),
    }
}

/// GET /journals
pub(crate) async fn handle_list_journals(State(state): State<Arc<AppState>>) -> Response {
    debug!("handle_list_journals: called");
    let store = state.store.clone();
    match run_blocking(move || store.fetch_journals()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => store_error(e),
    }
}

/// POST /gameplan/analyze
pub(crate) async fn handle_analyze(State(state): State<Arc<AppState>>) -> Response {
    debug!("handle_analyze: called");
    match state.synthesizer.synthesize().await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => pipeline_error(e),
    }
}

/// GET /gameplans
pub(crate) async fn handle_list_game_plans(State(state): State<Arc<AppState>>) -> Response {
    debug!("handle_list_game_plans: called");
    let store = state.store.clone();
    match run_blocking(move || store.list_all()).await {
        Ok(records) if records.is_empty() => json_error(StatusCode::NOT_FOUND, "no game plans available"),
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => store_error(e),
    }
}

/// POST /emotions/add
pub(crate) async fn handle_add_emotion(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddEmotionRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return bad_payload(rejection),
    };
    debug!(date = %req.date, emotion = %req.emotion, "handle_add_emotion: called");

    let store = state.store.clone();
    match run_blocking(move || store.add_emotion(&req.date, &req.emotion)).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => store_error(e),
    }
}

/// GET /emotions
pub(crate) async fn handle_list_emotions(State(state): State<Arc<AppState>>) -> Response {
    debug!("handle_list_emotions: called");
    let store = state.store.clone();
    match run_blocking(move || store.list_emotions()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => store_error(e),
    }
}

/// POST /clear
pub(crate) async fn handle_clear(State(state): State<Arc<AppState>>) -> Response {
    debug!("handle_clear: called");
    let store = state.store.clone();
    match run_blocking(move || store.clear()).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "cleared" }))).into_response(),
        Err(e) => store_error(e),
    }
}
