//! inventory-link demo entry point.
//!
//! Runs a connection manager against a console frontend until Ctrl-C.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use inventory_link::config::LinkConfig;
use inventory_link::ui::{ConsoleFrontend, Frontend};
use inventory_link::ws::ConnectionManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = LinkConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "starting inventory-link");

    // The console stands in for the hosting page.
    let frontend: Arc<dyn Frontend> = Arc::new(ConsoleFrontend::new(config.auto_confirm_refresh));

    let manager = ConnectionManager::spawn(config, frontend);
    tracing::info!(client_id = %manager.client_id(), "connection manager running");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    manager.shutdown().await?;

    Ok(())
}
