// File: bridge/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use bridge::config::BridgeConfig;
use bridge::registry::RequestRegistry;
use bridge::web::start_web_server;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("bridge=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting wallet bridge");

    let config = Arc::new(BridgeConfig::load("bridge.toml").await?);

    let registry = Arc::new(RequestRegistry::with_timeout(Duration::from_secs(
        config.request_timeout_seconds,
    )));
    info!("Request registry initialized");

    start_web_server(config, registry).await?;

    Ok(())
}
