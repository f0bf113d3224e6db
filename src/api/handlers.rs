//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    DraftRequest, EnterRequest, ErrorResponse, ModeInfo, ModeRequest, ModesResponse,
    QueuedResponse, SubmitRequest,
};
use super::AppState;
use crate::state_machine::{ModeSelector, SessionSnapshot};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Session view
        .route("/api/session", get(get_session))
        .route("/api/session/stream", get(stream_session))
        // Widget actions
        .route("/api/session/open", post(open_session))
        .route("/api/session/close", post(close_session))
        .route("/api/session/mode", post(select_mode))
        .route("/api/session/draft", post(edit_draft))
        .route("/api/session/submit", post(submit))
        .route("/api/session/enter", post(press_enter))
        .route("/api/session/back", post(back))
        // Mode picker
        .route("/api/modes", get(list_modes))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Session View
// ============================================================

async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

async fn stream_session(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before reading the snapshot so no update falls in between
    let broadcast_rx = state.session.subscribe();
    sse_stream(state.session.snapshot(), broadcast_rx)
}

// ============================================================
// Widget Actions
// ============================================================

async fn open_session(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.session.open().await.map_err(AppError::Internal)?;
    Ok(queued())
}

async fn close_session(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.session.close().await.map_err(AppError::Internal)?;
    Ok(queued())
}

async fn select_mode(
    State(state): State<AppState>,
    Json(req): Json<ModeRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state
        .session
        .select_mode(req.mode)
        .await
        .map_err(AppError::Internal)?;
    Ok(queued())
}

async fn edit_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state
        .session
        .edit_draft(req.text)
        .await
        .map_err(AppError::Internal)?;
    Ok(queued())
}

async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    match req.text {
        Some(text) => state.session.submit(text).await,
        None => state.session.submit_draft().await,
    }
    .map_err(AppError::Internal)?;
    Ok(queued())
}

async fn press_enter(
    State(state): State<AppState>,
    Json(req): Json<EnterRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state
        .session
        .press_enter(req.shift)
        .await
        .map_err(AppError::Internal)?;
    Ok(queued())
}

async fn back(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.session.back().await.map_err(AppError::Internal)?;
    Ok(queued())
}

fn queued() -> Json<QueuedResponse> {
    Json(QueuedResponse { queued: true })
}

// ============================================================
// Mode Picker
// ============================================================

async fn list_modes() -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: ModeSelector::options()
            .iter()
            .copied()
            .map(ModeInfo::from)
            .collect(),
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("article-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::error!(status = %status, error = %message, "Request failed");
        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
