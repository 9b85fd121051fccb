use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use pdf_tools::ToolKind;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::sessions::{find_session, session_request::SelectToolRequest},
};

pub async fn select_tool_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(p): Json<SelectToolRequest>,
) -> AppResult<Response> {
    let tool: ToolKind = p.tool.parse()?;
    let session = find_session(&state, &id).await?;
    session.select_tool(tool).await;
    Ok(ApiResponse::ok(session.snapshot().await))
}

/// Back to the tool grid.
pub async fn back_to_tools_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;
    session.back_to_tools().await;
    Ok(ApiResponse::ok(session.snapshot().await))
}
