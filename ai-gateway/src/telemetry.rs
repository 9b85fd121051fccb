//! Log layer for the document assistant and the tool sessions built on it.
//!
//! The binary installs its own global subscriber; [`layer`] is composed into
//! it and renders only events whose target belongs to [`DOMAIN_TARGETS`].
//! Assistant calls are `#[instrument]`ed, so span close lines carry their
//! latency.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefix of this crate's events.
pub const TARGET_PREFIX: &str = "ai_gateway";

/// Crates whose events go through [`layer`].
pub const DOMAIN_TARGETS: [&str; 2] = [TARGET_PREFIX, "pdf_tools"];

/// True for events emitted by one of [`DOMAIN_TARGETS`].
pub fn is_domain_target(target: &str) -> bool {
    DOMAIN_TARGETS.iter().any(|p| target.starts_with(p))
}

/// UTC timestamps with milliseconds, e.g. `2025-09-12T10:20:30.125Z`.
#[derive(Clone, Copy, Debug, Default)]
struct UtcMillis;

impl FormatTime for UtcMillis {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_str(&chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }
}

/// Compact single-line layer for domain events, with `file:line` and span
/// close timings. Colors only on a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(UtcMillis)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(FmtSpan::CLOSE)
        .event_format(
            fmt::format()
                .compact()
                .with_target(true)
                .with_source_location(true),
        )
        .with_filter(filter::filter_fn(|meta| is_domain_target(meta.target())))
}

/// `<crate>=<level>` for every domain crate.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let level = level.as_str().to_lowercase();
    DOMAIN_TARGETS
        .iter()
        .map(|target| {
            format!("{target}={level}")
                .parse()
                .unwrap_or_else(|_| Directive::from(LevelFilter::INFO))
        })
        .collect()
}

/// `RUST_LOG` (or `default`) with the domain crates raised to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    level_directives(level)
        .into_iter()
        .fold(base, EnvFilter::add_directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_domain_crates() {
        let rendered: Vec<String> = level_directives(Level::DEBUG)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["ai_gateway=debug", "pdf_tools=debug"]);
    }

    #[test]
    fn domain_target_matching() {
        assert!(is_domain_target("ai_gateway::document_assistant"));
        assert!(is_domain_target("pdf_tools::session"));
        assert!(!is_domain_target("api::routes"));
        assert!(!is_domain_target("hyper::proto"));
    }
}
