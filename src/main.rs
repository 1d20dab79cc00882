use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use trackhook::{server::routes::routes, Config, Webhook};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config ───────────────────────────────────────────────────
    let config = Config::from_env().context("loading configuration")?;

    // ─── 2) init logging ─────────────────────────────────────────────
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(config.log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("Starting tracking webhook adapter");

    // ─── 3) shared client + routes ───────────────────────────────────
    let client = Client::builder()
        .build()
        .context("building HTTP client")?;
    let webhook = Arc::new(Webhook::new(client, config.sheet_url.clone()));

    info!("Sheet source: {}", config.sheet_url);
    info!("Server starting on port {}", config.port);
    info!("Health check: http://localhost:{}/health", config.port);
    info!("Webhook endpoint: POST http://localhost:{}/webhook", config.port);

    warp::serve(routes(webhook))
        .run(([0, 0, 0, 0], config.port))
        .await;

    Ok(())
}
