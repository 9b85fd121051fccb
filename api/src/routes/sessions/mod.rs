pub mod chat_route;
pub mod download_route;
pub mod files_route;
pub mod process_route;
pub mod session_request;
pub mod session_route;
pub mod tool_route;

use std::sync::Arc;

use pdf_tools::{SessionId, ToolSession};

use crate::{core::app_state::AppState, error_handler::AppResult};

/// Resolves the `{id}` path segment to a live session.
pub(crate) async fn find_session(state: &AppState, id: &str) -> AppResult<Arc<ToolSession>> {
    let id: SessionId = id.parse()?;
    Ok(state.sessions.get(id).await?)
}
