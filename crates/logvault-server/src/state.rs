//! Shared state for the log server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use logvault_core::SharedLogStore;

use crate::config::ServerConfig;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    store: SharedLogStore,
    start_time: Instant,
}

impl AppState {
    /// Create state around an already-constructed store.
    pub fn new(config: ServerConfig, store: SharedLogStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
            start_time: Instant::now(),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> SharedLogStore {
        Arc::clone(&self.store)
    }

    /// Time since the state was created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("uptime", &self.uptime())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logvault_core::{LogLevel, LogRecord};

    #[test]
    fn test_state_shares_one_store() {
        let state = AppState::new(ServerConfig::default(), logvault_core::shared_memory_store());
        let cloned = state.clone();

        let record = LogRecord::builder()
            .level(LogLevel::Info)
            .message("hello")
            .resource_id("svc")
            .timestamp("2024-01-01T00:00:00Z")
            .trace_id("t")
            .span_id("s")
            .commit("c")
            .build()
            .unwrap();
        state.store().append(record).unwrap();

        assert_eq!(cloned.store().len().unwrap(), 1);
    }

    #[test]
    fn test_debug_omits_store() {
        let state = AppState::new(ServerConfig::default(), logvault_core::shared_memory_store());
        let debug = format!("{state:?}");
        assert!(debug.contains("AppState"));
        assert!(debug.contains("config"));
    }
}
