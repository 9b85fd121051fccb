use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    core::app_state::AppState, error_handler::AppResult, routes::sessions::find_session,
};

/// Streams the placeholder blob of the last simulated run as an attachment.
pub async fn download_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let session = find_session(&state, &id).await?;
    let artifact = session.artifact().await?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", header_safe_name(&artifact.file_name)),
        ),
    ];
    Ok((headers, artifact.body).into_response())
}

/// Header values must be visible ASCII; anything else becomes `_`.
fn header_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::header_safe_name;

    #[test]
    fn non_ascii_names_are_replaced() {
        assert_eq!(header_safe_name("report.docx"), "report.docx");
        assert_eq!(header_safe_name("تقرير v2.pdf"), "______v2.pdf");
        assert_eq!(header_safe_name("a\"b.pdf"), "a_b.pdf");
    }
}
