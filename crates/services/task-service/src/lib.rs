//! Task Service Library
//!
//! This crate provides an in-memory task list over HTTP.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use common::ApiKeyAuth;

use crate::config::TaskServiceConfig;
use crate::routes::create_router;
use crate::state::AppState;
use crate::store::TaskStore;

/// Run the task service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = TaskServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Build the fully layered router over a fresh store.
pub fn app(config: &TaskServiceConfig) -> axum::Router {
    let state = AppState::new(Arc::new(TaskStore::new()));
    create_router(state, ApiKeyAuth::new(config.api_key.clone()))
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: TaskServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = app(&config);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Task service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Task service stopped");
    Ok(())
}

/// Resolve on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
