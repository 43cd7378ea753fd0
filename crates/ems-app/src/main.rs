//! # EMS - Employee Management Service
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: InMemory / Sqlite EmployeeRepository (adapter) │
//! │    ├── Creates: EmployeeService (use case)                     │
//! │    ├── Creates: axum Router (controller)                       │
//! │    └── Runs: The HTTP server until Ctrl-C / SIGTERM            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use ems_adapter::controller::create_router_with_config;
use ems_adapter::repository::{InMemoryEmployeeRepository, SqliteEmployeeRepository};
use ems_domain::repository::employee_repository::EmployeeRepository;
use ems_usecase::EmployeeService;
use shared::config::{ServerConfig, StorageConfig};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().resolve()?;

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    match &config.storage {
        StorageConfig::Memory => {
            info!("Using in-memory employee store");
            serve(Arc::new(InMemoryEmployeeRepository::new()), &config).await
        }
        StorageConfig::Sqlite { path } => {
            info!(path = %path.display(), "Using SQLite employee store");
            let repo = SqliteEmployeeRepository::open(path)
                .with_context(|| format!("failed to open database {}", path.display()))?;
            serve(Arc::new(repo), &config).await
        }
    }
}

async fn serve<R: EmployeeRepository + 'static>(
    repo: Arc<R>,
    config: &ServerConfig,
) -> anyhow::Result<()> {
    let service = EmployeeService::new(repo);
    let app = create_router_with_config(service, config);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "EMS listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("EMS stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}
