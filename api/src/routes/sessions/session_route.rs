use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use pdf_tools::SessionId;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::{
        lang_query::{LangQuery, parse_locale},
        sessions::{find_session, session_request::SetLocaleRequest},
    },
};

#[derive(Debug, Serialize)]
pub struct ClosedSessionResponse {
    pub id: SessionId,
    pub closed: bool,
}

/// `POST /sessions?lang=` opens a session on the tool grid.
pub async fn create_session_route(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LangQuery>,
) -> AppResult<Response> {
    let session = state.sessions.create(q.locale()?).await;
    let snapshot = session.snapshot().await;
    info!(session = %snapshot.id, locale = %snapshot.locale, "create_session_route: created");
    Ok(ApiResponse::created(snapshot))
}

pub async fn get_session_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;
    Ok(ApiResponse::ok(session.snapshot().await))
}

pub async fn delete_session_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id: SessionId = id.parse()?;
    state.sessions.remove(id).await?;
    let body = ClosedSessionResponse { id, closed: true };
    Ok(ApiResponse::ok(body))
}

/// Switches the interface language; the transcript and result are kept.
pub async fn set_locale_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(p): Json<SetLocaleRequest>,
) -> AppResult<Response> {
    let locale = parse_locale(Some(&p.lang))?
        .ok_or_else(|| AppError::BadRequest("lang must not be empty".into()))?;
    let session = find_session(&state, &id).await?;
    session.set_locale(locale).await;
    debug!(session = %session.id(), %locale, "set_locale_route");
    Ok(ApiResponse::ok(session.snapshot().await))
}
