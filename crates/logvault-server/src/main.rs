//! Logvault server binary.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use logvault_core::{FileLogStore, MemoryLogStore, SharedLogStore};
use logvault_server::{Cli, LogServer, ServerConfig, StorageBackend};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();
    init_tracing(config.log_json);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = format!("{e:#}"), "logvault stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn open_store(config: &ServerConfig) -> SharedLogStore {
    match &config.storage {
        StorageBackend::File(path) => {
            info!(path = %path.display(), "Using file-backed log store");
            Arc::new(FileLogStore::with_path(path.clone()))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory log store; records are lost on exit");
            Arc::new(MemoryLogStore::new())
        }
    }
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config);

    // Creates the backing file on first start.
    let startup_store = Arc::clone(&store);
    match tokio::task::spawn_blocking(move || startup_store.len())
        .await
        .context("store startup check panicked")?
    {
        Ok(count) => info!(records = count, "Log store ready"),
        Err(e) => warn!(error = %e, "Log store is unreadable; reads and writes will fail until it is repaired"),
    }

    info!(addr = %config.bind_addr, "Starting logvault");
    let server = LogServer::new(config, store);
    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("log server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
