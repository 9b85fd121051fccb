mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use std::sync::Arc;

use ai_gateway::DocumentAssistant;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tokio::signal;
use tracing::{error, info};

pub use crate::core::app_state::{AppConfig, AppState, ConfigError};
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        catalog::tools_route::tools_route,
        health_route::health_route,
        sessions::{
            chat_route::chat_route,
            download_route::download_route,
            files_route::{attach_files_route, clear_files_route},
            process_route::process_route,
            session_route::{
                create_session_route, delete_session_route, get_session_route, set_locale_route,
            },
            tool_route::{back_to_tools_route, select_tool_route},
        },
    },
};

/// Builds the full route table over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/tools", get(tools_route))
        .route("/sessions", post(create_session_route))
        .route(
            "/sessions/{id}",
            get(get_session_route).delete(delete_session_route),
        )
        .route("/sessions/{id}/locale", put(set_locale_route))
        .route(
            "/sessions/{id}/tool",
            put(select_tool_route).delete(back_to_tools_route),
        )
        .route(
            "/sessions/{id}/files",
            put(attach_files_route).delete(clear_files_route),
        )
        .route("/sessions/{id}/process", post(process_route))
        .route("/sessions/{id}/chat", post(chat_route))
        .route("/sessions/{id}/download", get(download_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Serves the API on `config.address` until Ctrl+C.
///
/// # Errors
/// [`AppError::Bind`] when the address is unavailable, [`AppError::Server`]
/// when the accept loop fails.
pub async fn start(config: AppConfig, assistant: Arc<DocumentAssistant>) -> AppResult<()> {
    let state = Arc::new(AppState::new(&config, assistant));
    let sweeper = state.sessions.spawn_sweeper();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(
        address = %config.address,
        locale = %config.default_locale,
        session_ttl_secs = config.session_ttl.as_secs(),
        "api listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    served.map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps running.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ai_gateway::GatewayConfig;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let cfg = GatewayConfig::new("k").with_endpoint("http://127.0.0.1:9");
        let assistant = Arc::new(DocumentAssistant::new(cfg).unwrap());
        let config = AppConfig {
            simulated_delay: Duration::ZERO,
            ..AppConfig::default()
        };
        router(Arc::new(AppState::new(&config, assistant)))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    /// Sends `body` as-is, with only the headers given.
    async fn call_raw(app: &Router, uri: &str, headers: &[(&str, &str)], body: String) -> Response {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        app.clone().oneshot(builder.body(Body::from(body)).unwrap()).await.unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn new_session(app: &Router, lang: &str) -> String {
        let res = call(app, Method::POST, &format!("/sessions?lang={lang}"), None).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = json_body(res).await;
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_model() {
        let app = app();
        let res = call(&app, Method::GET, "/health", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert!(body["data"]["model"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn tools_are_localized() {
        let app = app();
        let body = json_body(call(&app, Method::GET, "/tools?lang=en", None).await).await;
        let tools = body["data"].as_array().unwrap();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[0]["id"], "merge");
        assert_eq!(tools[0]["accepts_multiple"], true);
        assert_eq!(tools[6]["is_ai"], true);

        let res = call(&app, Method::GET, "/tools?lang=fr", None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn simulated_tool_flow_ends_in_download() {
        let app = app();
        let id = new_session(&app, "en").await;
        let base = format!("/sessions/{id}");

        let res = call(&app, Method::PUT, &format!("{base}/tool"), Some(json!({"tool": "compress"}))).await;
        assert_eq!(res.status(), StatusCode::OK);

        let files = json!({"files": [{"name": "a.pdf", "size_bytes": 1048576}]});
        let body = json_body(call(&app, Method::PUT, &format!("{base}/files"), Some(files)).await).await;
        assert_eq!(body["data"]["files"][0]["size_label"], "1.00 MB");

        let body = json_body(call(&app, Method::POST, &format!("{base}/process"), None).await).await;
        assert_eq!(body["data"]["kind"], "artifact");
        assert_eq!(body["data"]["file_name"], "a-compressed.pdf");

        let res = call(&app, Method::GET, &format!("{base}/download"), None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"a-compressed.pdf\""
        );
    }

    #[tokio::test]
    async fn chat_falls_back_when_service_is_down() {
        let app = app();
        let id = new_session(&app, "en").await;
        let base = format!("/sessions/{id}");
        call(&app, Method::PUT, &format!("{base}/tool"), Some(json!({"tool": "ai-chat"}))).await;
        call(
            &app,
            Method::PUT,
            &format!("{base}/files"),
            Some(json!({"files": [{"name": "r.pdf", "size_bytes": 10}]})),
        )
        .await;

        let res = call(&app, Method::POST, &format!("{base}/chat"), Some(json!({"query": "hi"}))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["data"]["role"], "ai");
        assert_eq!(
            body["data"]["text"],
            ai_gateway::prompts::failure_message(ai_gateway::prompts::Task::Chat, ai_gateway::Locale::En)
        );

        let snap = json_body(call(&app, Method::GET, &base, None).await).await;
        assert_eq!(snap["data"]["chat_history"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn errors_use_the_envelope() {
        let app = app();

        let res = call(&app, Method::GET, "/sessions/not-a-uuid", None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(res).await["error"]["code"], "SESSION_NOT_FOUND");

        let id = new_session(&app, "ar").await;
        let base = format!("/sessions/{id}");

        let res = call(&app, Method::PUT, &format!("{base}/tool"), Some(json!({"tool": "ocr"}))).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["error"]["code"], "UNKNOWN_TOOL");

        let res = call(&app, Method::GET, &format!("{base}/download"), None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(res).await["error"]["code"], "NO_ARTIFACT");

        let res = call(&app, Method::PUT, &format!("{base}/files"), Some(json!({"files": 5}))).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.headers().contains_key("X-Request-Id"));
        let body = json_body(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert_eq!(body["error"]["details"][0]["path"], "files");

        let res = call(&app, Method::DELETE, &base, None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let res = call(&app, Method::GET, &base, None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_content_type_uses_the_envelope() {
        let app = app();
        let id = new_session(&app, "en").await;
        let uri = format!("/sessions/{id}/chat");

        let res = call_raw(&app, &uri, &[], json!({"query": "hi"}).to_string()).await;
        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
        assert!(res.headers().contains_key("X-Request-Id"));
        let body = json_body(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(
            body["error"]["details"][0]["hint"]
                .as_str()
                .is_some_and(|h| h.contains("Content-Type"))
        );
    }

    #[tokio::test]
    async fn oversized_body_uses_the_envelope() {
        let app = app();
        let id = new_session(&app, "en").await;
        let uri = format!("/sessions/{id}/chat");
        let huge = json!({"query": "a".repeat(3 * 1024 * 1024)}).to_string();

        let res = call_raw(&app, &uri, &[("content-type", "application/json")], huge).await;
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
        let body = json_body(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn nested_field_errors_name_the_full_path() {
        let app = app();
        let id = new_session(&app, "en").await;
        let base = format!("/sessions/{id}");
        call(&app, Method::PUT, &format!("{base}/tool"), Some(json!({"tool": "compress"}))).await;

        let res = call(&app, Method::PUT, &format!("{base}/files"), Some(json!({"files": [{"name": "a.pdf"}]}))).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(res).await;
        assert_eq!(body["error"]["details"][0]["path"], "files[0].size_bytes");
    }

    #[tokio::test]
    async fn snapshot_carries_localized_messages() {
        let app = app();
        let id = new_session(&app, "en").await;
        let base = format!("/sessions/{id}");
        let en = pdf_tools::Messages::for_locale(ai_gateway::Locale::En);
        let ar = pdf_tools::Messages::for_locale(ai_gateway::Locale::Ar);

        let snap = json_body(call(&app, Method::GET, &base, None).await).await;
        assert_eq!(snap["data"]["messages"]["delete_notice"], en.delete_notice);
        assert_eq!(snap["data"]["messages"]["upload_title"], en.upload_title);

        let res = call(&app, Method::PUT, &format!("{base}/locale"), Some(json!({"lang": "ar"}))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let snap = json_body(call(&app, Method::GET, &base, None).await).await;
        assert_eq!(snap["data"]["direction"], "rtl");
        assert_eq!(snap["data"]["messages"]["delete_notice"], ar.delete_notice);
    }
}
