//! Gemini service for text generation.
//!
//! Minimal, non-streaming client around the Gemini REST API. The endpoint is
//! derived from `GatewayConfig::endpoint`:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! Constructor validation:
//! - `cfg.api_key` must be non-empty
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Construction never touches the network. Errors are normalized via the
//! unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::gateway_config::GatewayConfig,
    error_handler::{AiGatewayError, HttpError, ProviderError, make_snippet},
};

/// Thin client for the Gemini API.
///
/// Constructed from a complete [`GatewayConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: GatewayConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderError::MissingApiKey`] if `cfg.api_key` is empty
    /// - [`ProviderError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiGatewayError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: GatewayConfig) -> Result<Self, AiGatewayError> {
        let api_key = cfg.api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey.into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        let mut api_key_header = header::HeaderValue::from_str(api_key)
            .map_err(|e| ProviderError::Decode(format!("invalid API key header: {e}")))?;
        api_key_header.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("x-goog-api-key", api_key_header);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{base}/v1beta/models/{}:generateContent", cfg.model);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs,
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Performs a single **non-streaming** `generateContent` request.
    ///
    /// The prompt is sent as one user turn; `system` becomes the request's
    /// `systemInstruction`.
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`AiGatewayError::HttpTransport`] for client/network failures
    /// - [`ProviderError::Decode`] if the JSON cannot be parsed
    /// - [`ProviderError::Blocked`] if the prompt was blocked
    /// - [`ProviderError::EmptyResponse`] if no candidate carries text
    pub async fn generate(&self, prompt: &str, system: &str) -> Result<String, AiGatewayError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode generateContent response"
                );
                return Err(ProviderError::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts[].text`"
                ))
                .into());
            }
        };

        let text = out.into_text()?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            answer_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: SystemInstruction<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &GatewayConfig, prompt: &'a str, system: &'a str) -> Self {
        let tuned = cfg.temperature.is_some() || cfg.top_p.is_some() || cfg.max_tokens.is_some();
        let generation_config = tuned.then(|| GenerationConfig {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_output_tokens: cfg.max_tokens,
        });

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part { text: system }],
            },
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Minimal response for `:generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate that has any.
    fn into_text(self) -> Result<String, ProviderError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::Blocked(reason));
        }

        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .find(|t| !t.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn service_for(server: &mockito::ServerGuard) -> GeminiService {
        let cfg = GatewayConfig::new("test-key")
            .with_endpoint(server.url())
            .with_model("gemini-test");
        GeminiService::new(cfg).unwrap()
    }

    #[test]
    fn empty_key_fails_before_any_request() {
        let err = GeminiService::new(GatewayConfig::new("  ")).unwrap_err();
        assert!(matches!(
            err,
            AiGatewayError::Provider(ProviderError::MissingApiKey)
        ));
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let cfg = GatewayConfig::new("k").with_endpoint("generativelanguage.googleapis.com");
        assert!(matches!(
            GeminiService::new(cfg),
            Err(AiGatewayError::Provider(ProviderError::InvalidEndpoint(_)))
        ));
    }

    #[tokio::test]
    async fn sends_prompt_and_system_instruction() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "systemInstruction": {"parts": [{"text": "be brief"}]}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{"content": {"role": "model", "parts": [
                        {"text": "Hi "}, {"text": "there"}
                    ]}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let svc = service_for(&server);
        let text = svc.generate("hello", "be brief").await.unwrap();

        assert_eq!(text, "Hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let err = service_for(&server).generate("q", "s").await.unwrap_err();
        match err {
            AiGatewayError::Provider(ProviderError::HttpStatus(http)) => {
                assert_eq!(http.status.as_u16(), 429);
                assert!(http.snippet.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blocked_and_empty_responses_are_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;
        let err = service_for(&server).generate("q", "s").await.unwrap_err();
        assert!(matches!(
            err,
            AiGatewayError::Provider(ProviderError::Blocked(ref r)) if r == "SAFETY"
        ));

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
            .create_async()
            .await;
        let err = service_for(&server).generate("q", "s").await.unwrap_err();
        assert!(matches!(
            err,
            AiGatewayError::Provider(ProviderError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = service_for(&server).generate("q", "s").await.unwrap_err();
        assert!(matches!(
            err,
            AiGatewayError::Provider(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn generation_config_only_when_tuned() {
        let cfg = GatewayConfig::new("k");
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&cfg, "p", "s")).unwrap();
        assert!(body.get("generationConfig").is_none());

        let mut cfg = GatewayConfig::new("k");
        cfg.max_tokens = Some(64);
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&cfg, "p", "s")).unwrap();
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 64);
        assert!(body["generationConfig"].get("temperature").is_none());

        let mut cfg = GatewayConfig::new("k");
        cfg.top_p = Some(0.5);
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&cfg, "p", "s")).unwrap();
        assert_eq!(body["generationConfig"]["topP"], 0.5);
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }
}
