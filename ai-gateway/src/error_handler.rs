//! Unified error handling for `ai-gateway`.
//!
//! This module exposes a single top-level error type [`AiGatewayError`] for the
//! whole library, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`ProviderError`]). Small helpers for reading/validating
//! configuration variables are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI Gateway]` to simplify attribution in logs.

use std::str::FromStr;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiGatewayError>;

/// Source of configuration values (process env in production, a map in tests).
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-gateway` crate.
///
/// Callers of [`crate::DocumentAssistant`]'s fallback methods never see this
/// type; it surfaces from configuration, client construction and the strict
/// `try_*` operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiGatewayError {
    /// Configuration/validation errors (startup only).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Completion service returned something we cannot use.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI Gateway] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable is missing or empty.
    #[error("[AI Gateway] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (timeouts, token limits).
    #[error("[AI Gateway] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI Gateway] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI Gateway] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI Gateway] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Details of a non-successful HTTP exchange.
#[derive(Debug)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL (without credentials).
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

/// Completion-service failures after a request was attempted, plus the
/// constructor checks that guard the request from being attempted at all.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured.
    #[error("[AI Gateway] API key is missing; configure GEMINI_API_KEY")]
    MissingApiKey,

    /// The endpoint is empty or does not start with http/https.
    #[error("[AI Gateway] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI Gateway] HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[AI Gateway] decode error: {0}")]
    Decode(String),

    /// The prompt was rejected by the service's safety filter.
    #[error("[AI Gateway] prompt blocked: {0}")]
    Blocked(String),

    /// The service answered without any text.
    #[error("[AI Gateway] completion contained no text")]
    EmptyResponse,
}

/// Cuts a response body down to something that fits in one log line.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 300;
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX).collect();
    out.push('…');
    out
}

/* ------------------------------------------------------------------------- */
/* Lookup helpers (return unified `Result<T>`)                               */
/* ------------------------------------------------------------------------- */

/// Reads a variable, treating empty/whitespace values as absent.
pub fn opt_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional number; `Ok(None)` when unset or blank.
///
/// # Errors
/// [`ConfigError::InvalidNumber`] with `expected` as the reason when the value
/// does not parse as `T`.
pub fn opt_parse<T: FromStr>(
    lookup: Lookup<'_>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>> {
    let Some(raw) = opt_var(lookup, name) else {
        return Ok(None);
    };
    raw.parse::<T>().map(Some).map_err(|_| {
        ConfigError::InvalidNumber {
            var: name,
            reason: expected,
        }
        .into()
    })
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_clamped() {
        let long = "x".repeat(1000);
        let s = make_snippet(&long);
        assert_eq!(s.chars().count(), 301);
        assert!(s.ends_with('…'));
        assert_eq!(make_snippet("  short  "), "short");
    }

    #[test]
    fn blank_values_count_as_missing() {
        let lookup = |name: &str| (name == "KEY").then(|| "   ".to_string());
        assert!(opt_var(&lookup, "KEY").is_none());
        assert_eq!(opt_parse::<u32>(&lookup, "KEY", "expected u32").unwrap(), None);
    }

    #[test]
    fn numbers_are_parsed_or_rejected() {
        let lookup = |name: &str| match name {
            "GOOD" => Some("42".to_string()),
            "BAD" => Some("forty-two".to_string()),
            _ => None,
        };
        assert_eq!(opt_parse::<u32>(&lookup, "GOOD", "expected u32").unwrap(), Some(42));
        assert_eq!(opt_parse::<u64>(&lookup, "MISSING", "expected u64").unwrap(), None);
        assert!(matches!(
            opt_parse::<f32>(&lookup, "BAD", "expected float"),
            Err(AiGatewayError::Config(ConfigError::InvalidNumber { var: "BAD", .. }))
        ));
    }

    #[test]
    fn endpoint_and_range_validation() {
        assert!(validate_http_endpoint("E", "https://example.com").is_ok());
        assert!(validate_http_endpoint("E", "ftp://example.com").is_err());
        assert!(validate_range_f32("t", 0.5, 0.0, 2.0).is_ok());
        assert!(validate_range_f32("t", f32::NAN, 0.0, 2.0).is_err());
        assert!(validate_range_f32("t", 2.5, 0.0, 2.0).is_err());
    }
}
