use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use tracing::{info, instrument, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::sessions::find_session,
};

/// Runs the selected tool. Holds the request open for the simulated delay
/// or the completion call.
#[instrument(skip(state))]
pub async fn process_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;

    match session.process().await {
        Ok(output) => {
            info!(session = %session.id(), "process_route: done");
            Ok(ApiResponse::ok(output))
        }
        Err(err) => {
            warn!(session = %session.id(), error = %err, "process_route: rejected");
            Err(err.into())
        }
    }
}
