mod bootstrap;
mod health;
pub mod products;

use std::time::Duration;

use anyhow::Result;
use shelf_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use shelf_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    // Now bootstrap using the same config we already loaded
    let app = bootstrap::bootstrap_with_config(config)?;

    let router = products::router(app.catalog.clone()).merge(health::router(app.catalog.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        bind_address = %address,
        product_count = app.catalog.len(),
        "shelf-server listening"
    );

    let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    let server = axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown());

    // Drain in-flight requests after the shutdown signal, but never hang past
    // the configured grace window.
    tokio::select! {
        result = server => result?,
        () = shutdown_deadline(grace) => {
            tracing::warn!(
                event_name = "system.server.drain_timeout",
                grace_secs = grace.as_secs(),
                "graceful shutdown window elapsed before connections drained"
            );
        }
    }

    tracing::info!(event_name = "system.server.stopped", "shelf-server stopped");

    Ok(())
}

async fn wait_for_shutdown() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!(
                event_name = "system.server.stopping",
                "shutdown signal received, draining connections"
            );
        }
        Err(error) => {
            tracing::error!(
                event_name = "system.server.signal_error",
                error = %error,
                "failed to listen for shutdown signal"
            );
        }
    }
}

async fn shutdown_deadline(grace: Duration) {
    let _ = tokio::signal::ctrl_c().await;
    tokio::time::sleep(grace).await;
}
