// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod api;
mod app;
mod config;
mod core;
mod logging;

use app::AppState;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    let log_path = logging::initialize_logging()?;
    info!(log_file = %log_path.display(), "Logging initialized.");

    if config.google_api_key().is_none() {
        warn!(
            variable = config::GOOGLE_API_KEY_ENV,
            "No Google API key configured; /check-quality will answer 500."
        );
    }

    let bind = config.bind;
    let state = Arc::new(AppState::new(config)?);
    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "web-check-rs listening.");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, draining connections.");
}
