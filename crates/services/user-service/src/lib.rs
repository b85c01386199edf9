//! User Service Library
//!
//! This crate provides user management over HTTP, backed by PostgreSQL or
//! an in-memory store. It can be run as a standalone service or embedded in
//! the combined binary.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use common::ApiKeyAuth;

use crate::config::{StorageBackend, UserServiceConfig};
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::routes::create_router;
use crate::service::UserManager;
use crate::state::AppState;

/// Run the user service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Build the fully layered router over the given repository.
pub fn app(repo: Arc<dyn UserRepository>, api_key: &str) -> axum::Router {
    let state = AppState::new(Arc::new(UserManager::new(repo)));
    create_router(state, ApiKeyAuth::new(api_key).detailed())
}

/// Construct the repository selected by configuration.
async fn build_repository(
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserRepository>, Box<dyn std::error::Error>> {
    let repo: Arc<dyn UserRepository> = match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            Arc::new(UserStore::new(
                db.get_connection(),
                config.database.exec_timeout(),
            ))
        }
        StorageBackend::Memory => {
            info!("Using in-memory user storage; data is lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };
    Ok(repo)
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = build_repository(&config).await?;
    let app = app(repo, &config.api_key);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("User service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

/// Resolve on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
