//! Log server implementation.

use std::net::SocketAddr;

use logvault_core::SharedLogStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use crate::routes::create_router;
use crate::state::AppState;

/// HTTP server exposing the ingest and query API.
#[derive(Debug, Clone)]
pub struct LogServer {
    state: AppState,
}

impl LogServer {
    /// Create a new server around `store`.
    #[must_use]
    pub fn new(config: ServerConfig, store: SharedLogStore) -> Self {
        Self {
            state: AppState::new(config, store),
        }
    }

    /// Get the server state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Start the server on the configured address and run until a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self) -> ApiResult<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.state.config().bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        self.run(listener, shutdown).await
    }

    /// Serve on an already-bound listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails.
    pub async fn run<F>(&self, listener: TcpListener, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener
            .local_addr()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!(addr = %addr, "Log server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!("Log server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logvault_core::shared_memory_store;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let server = LogServer::new(ServerConfig::new(addr), shared_memory_store());
        let err = server.serve_with_shutdown(async {}).await.unwrap_err();

        assert!(matches!(err, ApiError::BindFailed(a, _) if a == addr));
    }

    #[tokio::test]
    async fn test_serves_health_and_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = LogServer::new(ServerConfig::new(addr), shared_memory_store());

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .run(listener, async {
                    let _ = rx.await;
                })
                .await
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains(r#""status":"OK""#));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
