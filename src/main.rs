use std::{error::Error, sync::Arc};

use ai_gateway::{DocumentAssistant, GatewayConfig, telemetry};
use api::AppConfig;
use tracing::{Level, info};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the real environment.
    dotenvy::dotenv().ok();

    // Domain crates log through the telemetry layer; everything else here.
    let app_logs = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !telemetry::is_domain_target(meta.target())
        }));

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(app_logs)
        .with(telemetry::layer())
        .try_init()?;

    // Missing credential is fatal: the assistant is never built without one.
    let gateway = GatewayConfig::from_env()?;
    let config = AppConfig::from_env()?;

    let assistant = Arc::new(DocumentAssistant::new(gateway)?);
    info!(model = %assistant.model(), "document assistant ready");

    api::start(config, assistant).await?;

    Ok(())
}
