//! `confession-relay` entry point.

use anyhow::Context;
use clap::Parser;
use confession_relay::AppState;
use confession_relay::RelayConfig;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing so RUST_LOG may come from .env.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("confession-relay v{} starting", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("Ignoring unreadable .env file: {err}"),
    }

    let config = RelayConfig::parse();

    let address = config.bind_address();
    let public_dir = config.public_dir.clone();
    let state = AppState::new(config);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("Server running on http://{address}");
    tracing::info!("Serving static files from {}", public_dir.display());

    confession_relay::serve(listener, state, confession_relay::shutdown_signal()).await?;

    tracing::info!("confession-relay exiting cleanly");
    Ok(())
}
