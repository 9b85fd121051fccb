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
    routes::sessions::{find_session, session_request::AttachFilesRequest},
};

#[instrument(skip(state, p))]
pub async fn attach_files_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(p): Json<AttachFilesRequest>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;
    debug!(session = %session.id(), files = p.files.len(), "attach_files_route");
    session.attach_files(p.files).await?;
    Ok(ApiResponse::ok(session.snapshot().await))
}

pub async fn clear_files_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;
    session.clear_files().await;
    Ok(ApiResponse::ok(session.snapshot().await))
}
