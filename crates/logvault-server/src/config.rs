//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

/// Default location of the backing file.
pub const DEFAULT_DATA_FILE: &str = "data/logs.json";

/// Where the server keeps its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// A JSON array file on disk.
    File(PathBuf),
    /// Process memory; lost on exit.
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATA_FILE))
    }
}

/// Configuration for the log server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Record storage.
    pub storage: StorageBackend,
    /// Allowed CORS origins (empty = allow all).
    pub cors_origins: Vec<String>,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            storage: StorageBackend::default(),
            cors_origins: Vec::new(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Store records in the given file.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = StorageBackend::File(path.into());
        self
    }

    /// Keep records in memory only.
    #[must_use]
    pub fn with_memory_storage(mut self) -> Self {
        self.storage = StorageBackend::Memory;
        self
    }

    /// Set allowed CORS origins.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Switch log output to JSON lines.
    #[must_use]
    pub const fn with_log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }
}
