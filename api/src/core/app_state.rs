use std::{sync::Arc, time::Duration};

use ai_gateway::{DocumentAssistant, Locale};
use pdf_tools::{
    SessionStore, SimulatedProcessor, processor::DEFAULT_DELAY, store::DEFAULT_SESSION_TTL,
};
use thiserror::Error;

/// Address used when `API_ADDRESS` is not set.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

/// Startup configuration errors of the HTTP layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid {
        var: &'static str,
        reason: String,
    },
}

/// HTTP-layer settings.
///
/// # Environment variables
/// - `API_ADDRESS`        = bind address (default `127.0.0.1:8080`)
/// - `DEFAULT_LOCALE`     = `ar` | `en` for new sessions (default `ar`)
/// - `SIMULATED_DELAY_MS` = fake processing time of conversion tools (default `2000`)
/// - `SESSION_TTL_SECS`   = idle time before a session is evicted (default `3600`, must be > 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub address: String,
    pub default_locale: Locale,
    pub simulated_delay: Duration,
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            default_locale: Locale::default(),
            simulated_delay: DEFAULT_DELAY,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl AppConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name: &str| std::env::var(name).ok())
    }

    /// Load settings from an arbitrary variable source.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let default_locale = match get("DEFAULT_LOCALE") {
            Some(v) => v.parse().map_err(|e: ai_gateway::UnknownLocale| ConfigError::Invalid {
                var: "DEFAULT_LOCALE",
                reason: e.to_string(),
            })?,
            None => defaults.default_locale,
        };

        let simulated_delay = match get("SIMULATED_DELAY_MS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    var: "SIMULATED_DELAY_MS",
                    reason: format!("expected milliseconds as u64, got `{v}`"),
                })?,
            None => defaults.simulated_delay,
        };

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SESSION_TTL_SECS",
                        reason: format!("expected seconds as a positive u64, got `{v}`"),
                    });
                }
            },
            None => defaults.session_ttl,
        };

        Ok(Self {
            address: get("API_ADDRESS").unwrap_or(defaults.address),
            default_locale,
            simulated_delay,
            session_ttl,
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Live tool sessions; also owns the document assistant.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Wires the session store around the single assistant instance.
    pub fn new(config: &AppConfig, assistant: Arc<DocumentAssistant>) -> Self {
        let store = SessionStore::new(
            assistant,
            SimulatedProcessor::new(config.simulated_delay),
            config.default_locale,
        )
        .with_session_ttl(config.session_ttl);
        Self {
            sessions: Arc::new(store),
        }
    }
}
