//! HTTP server startup

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::models::settings::AppConfig;
use crate::server::routing::create_router;
use crate::state::AppState;

/// Build the services from `config` and serve until Ctrl-C.
pub async fn start_server(config: AppConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::from_config(&config)?;

    let static_dir = if config.static_dir.is_dir() {
        Some(config.static_dir.as_path())
    } else {
        warn!(path = %config.static_dir.display(), "static directory not found, serving API only");
        None
    };
    let app = create_router(state, static_dir);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
