use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use taskstreak_infrastructure::config::AppConfig;
use taskstreak_infrastructure::logging::{get_log_dir, init_logger};
use taskstreak_lib::presentation::bootstrap::build_app_state;
use taskstreak_lib::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional first argument: path to taskstreak.json
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    init_logger(config.log_dir()?, config.log_level)?;
    info!("🚀 TaskStreak v{} starting", env!("CARGO_PKG_VERSION"));
    info!("Store backend: {:?}, logs in {:?}", config.store, get_log_dir());

    let state = build_app_state(&config).await?;
    let router = build_router(Arc::new(state));

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind_address '{}'", config.bind_address))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
