use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Response,
};
use pdf_tools::tool_catalog;
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::lang_query::LangQuery,
};

/// Localized tool grid; falls back to the store's default locale.
pub async fn tools_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LangQuery>,
) -> AppResult<Response> {
    let locale = q.locale()?.unwrap_or(state.sessions.default_locale());
    debug!(%locale, "tools_route");
    Ok(ApiResponse::ok(tool_catalog(locale)))
}
