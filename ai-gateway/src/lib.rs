//! Document assistant gateway for the PDF manager.
//!
//! Accepts a user question (or a summarize request) about an uploaded
//! document, issues one request to the hosted Gemini completion service and
//! returns the generated text or a localized fallback message.

pub mod config;
pub mod document_assistant;
pub mod error_handler;
pub mod locale;
pub mod prompts;
pub mod services;
pub mod telemetry;

pub use config::gateway_config::GatewayConfig;
pub use document_assistant::DocumentAssistant;
pub use error_handler::{AiGatewayError, ConfigError, ProviderError};
pub use locale::{Direction, Locale, UnknownLocale};
