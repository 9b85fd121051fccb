use std::sync::Arc;

use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub sessions: usize,
}

/// Liveness probe. Never calls the completion service.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let body = HealthResponse {
        status: "ok",
        model: state.sessions.assistant().model().to_string(),
        sessions: state.sessions.len().await,
    };
    ApiResponse::ok(body)
}
