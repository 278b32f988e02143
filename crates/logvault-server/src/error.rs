//! Error types for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use logvault_core::LogError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for server operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the log server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted record failed schema validation.
    #[error("validation failed: {}", .details.join("; "))]
    InvalidRecord {
        /// One message per violation.
        details: Vec<String>,
    },

    /// The query parameters failed validation.
    #[error("invalid query parameters: {}", .details.join("; "))]
    InvalidQuery {
        /// One message per violation.
        details: Vec<String>,
    },

    /// The store could not persist a record.
    #[error("failed to create log entry: {0}")]
    Persistence(#[source] LogError),

    /// The store could not be read.
    #[error("failed to retrieve logs: {0}")]
    Retrieval(#[source] LogError),

    /// No route matched.
    #[error("route {0} not found")]
    NotFound(String),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRecord { .. } | Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Retrieval(_) | Self::BindFailed(_, _) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorResponse {
    Details {
        error: &'static str,
        details: Vec<String>,
    },
    Message {
        error: &'static str,
        message: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidRecord { details } => ErrorResponse::Details {
                error: "Validation failed",
                details,
            },
            Self::InvalidQuery { details } => ErrorResponse::Details {
                error: "Invalid query parameters",
                details,
            },
            Self::NotFound(route) => ErrorResponse::Message {
                error: "Not Found",
                message: format!("Route {route} not found"),
            },
            Self::Persistence(_) => ErrorResponse::Message {
                error: "Internal Server Error",
                message: "Failed to create log entry".to_string(),
            },
            Self::Retrieval(_) => ErrorResponse::Message {
                error: "Internal Server Error",
                message: "Failed to retrieve logs".to_string(),
            },
            Self::BindFailed(_, _) | Self::Internal(_) => ErrorResponse::Message {
                error: "Internal Server Error",
                message: "Something went wrong".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
