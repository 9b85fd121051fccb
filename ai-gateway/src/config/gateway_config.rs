//! Gateway configuration loaded strictly from environment variables.
//!
//! The configuration is populated once at startup and validated before any
//! client is constructed. A missing API key is a fatal configuration error.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY` (or legacy `API_KEY`) = API credential (mandatory)
//! - `GEMINI_MODEL`     = model identifier (default `gemini-3-pro-preview`)
//! - `GEMINI_ENDPOINT`  = API base URL (default `https://generativelanguage.googleapis.com`)
//! - `LLM_TIMEOUT_SECS` = request timeout in seconds (default `60`)
//! - `LLM_MAX_TOKENS`   = optional `maxOutputTokens`
//! - `LLM_TEMPERATURE`  = optional sampling temperature in `0.0..=2.0`
//! - `LLM_TOP_P`        = optional nucleus sampling mass in `0.0..=1.0`

use std::fmt;

use crate::error_handler::{
    ConfigError, Lookup, Result, opt_parse, opt_var, validate_http_endpoint, validate_range_f32,
};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Public Gemini API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Request timeout used when `LLM_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the hosted completion model.
///
/// # Fields
///
/// - `api_key`: credential sent as `x-goog-api-key`.
/// - `model`: the model identifier (e.g., `"gemini-3-pro-preview"`).
/// - `endpoint`: API base URL; tests point this at a local mock server.
/// - `max_tokens`: maximum number of tokens to generate.
/// - `temperature`: controls randomness (0.0 = deterministic).
/// - `top_p`: nucleus sampling probability mass.
/// - `timeout_secs`: request timeout in seconds.
#[derive(Clone, PartialEq)]
pub struct GatewayConfig {
    /// API credential.
    pub api_key: String,

    /// Model identifier string.
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling (`topP`).
    pub top_p: Option<f32>,

    /// Request timeout (in seconds).
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Builds a config with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Replaces the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replaces the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Loads and validates the config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|name: &str| std::env::var(name).ok())
    }

    /// Loads and validates the config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingVar`] if neither `GEMINI_API_KEY` nor `API_KEY` is set
    /// - [`ConfigError::InvalidNumber`] for unparsable numeric variables
    /// - [`ConfigError::InvalidFormat`] if `GEMINI_ENDPOINT` is not http(s)
    /// - [`ConfigError::OutOfRange`] if `LLM_TEMPERATURE` is outside `0.0..=2.0`
    ///   or `LLM_TOP_P` is outside `0.0..=1.0`
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let api_key = opt_var(lookup, "GEMINI_API_KEY")
            .or_else(|| opt_var(lookup, "API_KEY"))
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let cfg = Self {
            api_key,
            model: opt_var(lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: opt_var(lookup, "GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            max_tokens: opt_parse(lookup, "LLM_MAX_TOKENS", "expected u32")?,
            temperature: opt_parse(lookup, "LLM_TEMPERATURE", "expected float")?,
            top_p: opt_parse(lookup, "LLM_TOP_P", "expected float")?,
            timeout_secs: opt_parse(lookup, "LLM_TIMEOUT_SECS", "expected u64")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks invariants that every constructor must uphold.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("GEMINI_API_KEY").into());
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("GEMINI_ENDPOINT", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
