//! Document assistant: the single gateway between UI-level questions and the
//! hosted completion model.
//!
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - [`DocumentAssistant::chat`] and [`DocumentAssistant::summarize`] never fail:
//!   any service error is logged and replaced by a fixed localized message.
//! - The strict `try_*` variants return the underlying [`AiGatewayError`].
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_gateway::{DocumentAssistant, GatewayConfig, Locale};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assistant = Arc::new(DocumentAssistant::new(GatewayConfig::from_env()?)?);
//! let answer = assistant
//!     .chat("What is page 2 about?", "report.pdf", "", Locale::En)
//!     .await;
//! println!("{answer}");
//! # Ok(()) }
//! ```

use tracing::{error, instrument, warn};

use crate::{
    config::gateway_config::GatewayConfig,
    error_handler::{AiGatewayError, ProviderError},
    locale::Locale,
    prompts::{self, Task},
    services::gemini_service::GeminiService,
};

/// Gateway translating document questions into completion requests.
#[derive(Debug)]
pub struct DocumentAssistant {
    service: GeminiService,
}

impl DocumentAssistant {
    /// Validates `cfg` and builds the underlying client.
    ///
    /// # Errors
    /// Returns [`AiGatewayError::Config`] or [`AiGatewayError::Provider`] when the
    /// credential or endpoint is unusable. No request is sent.
    pub fn new(cfg: GatewayConfig) -> Result<Self, AiGatewayError> {
        cfg.validate()?;
        Ok(Self {
            service: GeminiService::new(cfg)?,
        })
    }

    /// Model identifier the assistant talks to.
    pub fn model(&self) -> &str {
        self.service.model()
    }

    /// Answers `query` about `document_name` using `context`.
    ///
    /// Returns the model's text, or the localized fallback on any failure.
    #[instrument(name = "assistant_chat", skip_all, fields(document = %document_name, %locale))]
    pub async fn chat(
        &self,
        query: &str,
        document_name: &str,
        context: &str,
        locale: Locale,
    ) -> String {
        let result = self.try_chat(query, document_name, context, locale).await;
        Self::or_fallback(result, Task::Chat, locale)
    }

    /// Produces a summary of `document_name` from its textual `description`.
    ///
    /// Returns the model's text, or the localized fallback on any failure.
    #[instrument(name = "assistant_summarize", skip_all, fields(document = %document_name, %locale))]
    pub async fn summarize(&self, document_name: &str, description: &str, locale: Locale) -> String {
        let result = self.try_summarize(document_name, description, locale).await;
        Self::or_fallback(result, Task::Summarize, locale)
    }

    /// Strict variant of [`DocumentAssistant::chat`].
    ///
    /// # Errors
    /// Propagates transport, status and decode failures from the service.
    pub async fn try_chat(
        &self,
        query: &str,
        document_name: &str,
        context: &str,
        locale: Locale,
    ) -> Result<String, AiGatewayError> {
        let prompt = prompts::chat_prompt(locale, query, document_name, context);
        self.service
            .generate(&prompt, prompts::system_instruction(Task::Chat, locale))
            .await
    }

    /// Strict variant of [`DocumentAssistant::summarize`].
    ///
    /// # Errors
    /// Propagates transport, status and decode failures from the service.
    pub async fn try_summarize(
        &self,
        document_name: &str,
        description: &str,
        locale: Locale,
    ) -> Result<String, AiGatewayError> {
        let prompt = prompts::summarize_prompt(locale, document_name, description);
        self.service
            .generate(&prompt, prompts::system_instruction(Task::Summarize, locale))
            .await
    }

    fn or_fallback(result: Result<String, AiGatewayError>, task: Task, locale: Locale) -> String {
        match result {
            Ok(text) => text,
            Err(AiGatewayError::Provider(ProviderError::EmptyResponse)) => {
                warn!(?task, "completion service returned no text");
                prompts::empty_message(task, locale).to_string()
            }
            Err(e) => {
                error!(error = %e, ?task, "completion request failed");
                prompts::failure_message(task, locale).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    const PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn assistant_for(server: &mockito::ServerGuard) -> DocumentAssistant {
        let cfg = GatewayConfig::new("test-key")
            .with_endpoint(server.url())
            .with_model("gemini-test");
        DocumentAssistant::new(cfg).unwrap()
    }

    fn answer(text: &str) -> String {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
    }

    #[test]
    fn missing_credential_fails_construction() {
        let err = DocumentAssistant::new(GatewayConfig::new("")).unwrap_err();
        assert!(matches!(err, AiGatewayError::Config(_)));
    }

    #[tokio::test]
    async fn chat_returns_model_text_and_embeds_inputs() {
        let mut server = mockito::Server::new_async().await;
        let expected_prompt = prompts::chat_prompt(Locale::En, "What is page 2 about?", "report.pdf", "");
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"parts": [{"text": expected_prompt}]}],
                "systemInstruction": {"parts": [{"text": prompts::system_instruction(Task::Chat, Locale::En)}]}
            })))
            .with_status(200)
            .with_body(answer("Page 2 covers X"))
            .create_async()
            .await;

        let out = assistant_for(&server)
            .chat("What is page 2 about?", "report.pdf", "", Locale::En)
            .await;

        assert_eq!(out, "Page 2 covers X");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn summarize_returns_model_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .match_body(Matcher::Regex("contract\\.pdf".into()))
            .with_status(200)
            .with_body(answer("- point one\n- point two"))
            .create_async()
            .await;

        let out = assistant_for(&server)
            .summarize("contract.pdf", "User uploaded file for processing.", Locale::En)
            .await;
        assert_eq!(out, "- point one\n- point two");
    }

    #[tokio::test]
    async fn service_failure_yields_localized_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(500)
            .with_body("boom")
            .expect(2)
            .create_async()
            .await;
        let assistant = assistant_for(&server);

        let ar = assistant.chat("q", "a.pdf", "ctx", Locale::Ar).await;
        assert_eq!(ar, prompts::failure_message(Task::Chat, Locale::Ar));

        let en = assistant.summarize("a.pdf", "desc", Locale::En).await;
        assert_eq!(en, prompts::failure_message(Task::Summarize, Locale::En));
    }

    #[tokio::test]
    async fn unreachable_service_yields_fallback() {
        // Nothing listens on port 9 of the loopback interface.
        let cfg = GatewayConfig::new("k").with_endpoint("http://127.0.0.1:9");
        let assistant = DocumentAssistant::new(cfg).unwrap();
        let out = assistant.chat("q", "a.pdf", "", Locale::En).await;
        assert_eq!(out, prompts::failure_message(Task::Chat, Locale::En));
    }

    #[tokio::test]
    async fn empty_answer_yields_empty_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let out = assistant_for(&server).summarize("a.pdf", "d", Locale::Ar).await;
        assert_eq!(out, prompts::empty_message(Task::Summarize, Locale::Ar));
    }

    #[tokio::test]
    async fn strict_variant_surfaces_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(403)
            .create_async()
            .await;

        let err = assistant_for(&server)
            .try_chat("q", "a.pdf", "", Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, AiGatewayError::Provider(ProviderError::HttpStatus(_))));
    }
}
