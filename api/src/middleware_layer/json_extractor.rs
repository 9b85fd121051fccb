//! Turns axum's plain-text extractor rejections (bad JSON, wrong field types,
//! missing content type, oversized bodies) into the JSON envelope. Handler
//! errors are already JSON and pass through.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

const REQUEST_ID: &str = "x-request-id";

/// Rejection bodies are one-line serde messages.
const MAX_REJECTION_BODY: usize = 64 * 1024;

/// Precedes the serde path in axum's data-error text.
const TARGET_TYPE: &str = "target type: ";

const HINTS: [(&str, &str); 5] = [
    (
        "expected a sequence",
        "Expected an array, e.g. [{\"name\": \"a.pdf\", \"size_bytes\": 1024}].",
    ),
    ("expected a string", "Expected a JSON string."),
    ("missing field", "A required field is missing from the JSON body."),
    ("Content-Type", "Send the body with `Content-Type: application/json`."),
    ("length limit", "Request bodies are limited to 2 MB."),
];

pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let request_id = req.headers().get(REQUEST_ID).cloned();
    let res = next.run(req).await;

    let Some(code) = rejection_code(res.status()) else {
        return res;
    };
    if is_json(res.headers()) {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let raw = axum::body::to_bytes(body, MAX_REJECTION_BODY)
        .await
        .unwrap_or_default();
    let message = String::from_utf8_lossy(&raw).trim().to_string();

    let details = rejection_detail(&message).into_iter().collect();
    let envelope = ApiResponse::<()>::error(code, message, details);
    let Ok(json) = serde_json::to_vec(&envelope) else {
        return Response::from_parts(parts, Body::from(raw));
    };

    if let Some(id) = request_id.or_else(generated_request_id) {
        parts.headers.insert(REQUEST_ID, id);
    }
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(json))
}

/// Statuses axum's body extractors answer with in plain text.
fn rejection_code(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("BAD_REQUEST"),
        StatusCode::UNPROCESSABLE_ENTITY => Some("UNPROCESSABLE_ENTITY"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => Some("UNSUPPORTED_MEDIA_TYPE"),
        StatusCode::PAYLOAD_TOO_LARGE => Some("PAYLOAD_TOO_LARGE"),
        _ => None,
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn generated_request_id() -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("req-{}", Utc::now().timestamp_micros())).ok()
}

/// Reads the serde path that prefixes a data error (`files[0]: ...`) and
/// appends the name of a missing field, giving e.g. `files[0].size_bytes`.
fn field_path(message: &str) -> Option<String> {
    let rest = message
        .split_once(TARGET_TYPE)
        .map_or(message, |(_, tail)| tail);

    let (prefix, tail) = match rest.split_once(": ") {
        Some((p, t)) if is_path(p) => (Some(p), t),
        _ => (None, rest),
    };
    let missing = tail
        .split_once("missing field `")
        .and_then(|(_, r)| r.split_once('`'))
        .map(|(field, _)| field);

    match (prefix, missing) {
        (Some(p), Some(f)) => Some(format!("{p}.{f}")),
        (Some(p), None) => Some(p.to_string()),
        (None, Some(f)) => Some(f.to_string()),
        (None, None) => None,
    }
}

fn is_path(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}

fn rejection_detail(message: &str) -> Option<ApiErrorDetail> {
    let path = field_path(message);
    let hint = HINTS
        .into_iter()
        .find_map(|(needle, hint)| message.contains(needle).then_some(hint));

    if path.is_none() && hint.is_none() {
        return None;
    }
    Some(ApiErrorDetail {
        path,
        hint: hint.map(str::to_string),
    })
}
