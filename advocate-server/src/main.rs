//! advocate-server: standalone REST server for the advocate directory.
//!
//! See [`advocate_server::config`] for the environment variables it reads.

use advocate_server::{build_router, AppState, ServerConfig};
use anyhow::Context;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,advocate_server=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::connect(&config).await;
    tracing::info!(backend = %state.kind(), "record store ready");

    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("advocate-server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
