//! HTTP service for logvault.
//!
//! Exposes the store and validators over three routes:
//!
//! - `POST /logs` validates and appends one record
//! - `GET /logs` returns matching records, newest first
//! - `GET /health` reports liveness
//!
//! ```no_run
//! use logvault_core::shared_memory_store;
//! use logvault_server::{LogServer, ServerConfig};
//!
//! # async fn run() -> Result<(), logvault_server::ApiError> {
//! let server = LogServer::new(ServerConfig::default(), shared_memory_store());
//! server.serve().await
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use cli::{Cli, LogFormat};
pub use config::{ServerConfig, StorageBackend};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::LogServer;
pub use state::AppState;
