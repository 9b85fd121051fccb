use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::sessions::{find_session, session_request::ChatRequest},
};

/// One chat turn. The reply is the model text or its localized fallback.
#[instrument(skip(state, p))]
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(p): Json<ChatRequest>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;
    debug!(session = %session.id(), query_len = p.query.len(), "chat_route: start");
    let reply = session.send_chat(&p.query).await?;
    Ok(ApiResponse::ok(reply))
}
