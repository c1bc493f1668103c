//! AdPulse Dashboard Server
//!
//! Run with: cargo run --bin adpulse
//!
//! # Configuration
//!
//! Loaded from the first of `~/.config/adpulse/config.toml`,
//! `/etc/adpulse/config.toml`, `./config.toml`, then overridden by
//! environment variables:
//! - `ADPULSE_BACKEND_URL`: analytics backend base URL (required)
//! - `ADPULSE_BACKEND_API_KEY`: backend API key (required)
//! - `ADPULSE_HOST` / `ADPULSE_PORT`: bind address (default 0.0.0.0:8090)
//! - `ADPULSE_LOG_LEVEL` / `ADPULSE_LOG_FORMAT`: logging
//! - `RUST_LOG`: overrides the log filter entirely

use adpulse::backend::BackendClient;
use adpulse::config::Config;
use adpulse::web::{serve, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config);

    tracing::info!("Starting AdPulse dashboard v{}", env!("CARGO_PKG_VERSION"));

    // A missing backend config is surfaced, not fatal: the overview and
    // health pages still render and explain what is wrong.
    match config.validate() {
        Ok(()) => {
            tracing::info!("Analytics backend: {}", config.backend.base_url);
        }
        Err(e) => {
            tracing::warn!("Backend not configured: {} (pages will render empty)", e);
        }
    }

    let backend = Arc::new(BackendClient::new(config.backend.clone()));
    let state = AppState::new(backend, config);

    serve(state).await?;

    tracing::info!("AdPulse dashboard stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "adpulse={},tower_http=debug",
            config.logging.level
        ))
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
