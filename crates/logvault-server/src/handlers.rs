//! HTTP request handlers for the log API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use logvault_core::{LogRecord, NewLogRecord, QueryFilter, QueryParams, Timestamp};
use logvault_validation::{validate_log_entry, validate_query_params};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `OK` while the process serves requests.
    pub status: &'static str,
    /// Time the check was answered.
    pub timestamp: Timestamp,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Timestamp::now(),
        uptime_secs: state.uptime().as_secs(),
    })
}

/// `POST /logs` validates and stores one record.
///
/// A body that is not JSON is validated as if it were `null`, so the caller
/// gets the usual validation response.
pub async fn create_log(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LogRecord>)> {
    let payload = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(error = %rejection, "request body is not a JSON document");
            Value::Null
        }
    };

    let validation = validate_log_entry(&payload);
    if !validation.is_valid {
        let details = validation.messages();
        warn!(errors = ?details, "rejected log entry");
        return Err(ApiError::InvalidRecord { details });
    }

    let record = NewLogRecord::from_value(payload).map_err(|e| ApiError::InvalidRecord {
        details: vec![e.to_string()],
    })?;

    let store = state.store();
    let stored = tokio::task::spawn_blocking(move || store.append(record))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| {
            error!(error = %e, "failed to create log entry");
            ApiError::Persistence(e)
        })?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// `GET /logs` returns matching records, newest first.
pub async fn list_logs(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> ApiResult<Json<Vec<LogRecord>>> {
    let Query(params) = params.map_err(|rejection| {
        warn!(error = %rejection, "malformed query string");
        ApiError::InvalidQuery {
            details: vec![rejection.body_text()],
        }
    })?;

    let validation = validate_query_params(&params);
    if !validation.is_valid {
        let details = validation.messages();
        warn!(errors = ?details, "rejected log query");
        return Err(ApiError::InvalidQuery { details });
    }

    let filter = QueryFilter::try_from(&params).map_err(|e| ApiError::InvalidQuery {
        details: vec![e.to_string()],
    })?;

    let store = state.store();
    let records = tokio::task::spawn_blocking(move || store.query(&filter))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| {
            error!(error = %e, "failed to retrieve logs");
            ApiError::Retrieval(e)
        })?;

    debug!(count = records.len(), "served log query");
    Ok(Json(records))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use logvault_core::{shared_memory_store, LogLevel};
    use serde_json::json;

    fn make_test_state() -> AppState {
        AppState::new(ServerConfig::default(), shared_memory_store())
    }

    fn entry(level: &str, resource_id: &str, message: &str, timestamp: &str) -> Value {
        json!({
            "level": level,
            "message": message,
            "resourceId": resource_id,
            "timestamp": timestamp,
            "traceId": "trace-1",
            "spanId": "span-1",
            "commit": "5e5342f",
            "metadata": { "region": "eu-west-1" }
        })
    }

    fn query(pairs: &[(&str, &str)]) -> Result<Query<QueryParams>, QueryRejection> {
        let map: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
            .collect();
        Ok(Query(serde_json::from_value(Value::Object(map)).unwrap()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = make_test_state();
        let response = health_check(State(state)).await;

        assert_eq!(response.status, "OK");
        let json = serde_json::to_value(&response.0).unwrap();
        assert!(json["uptimeSecs"].is_u64());
        assert!(json.get("uptime_secs").is_none());
    }

    #[tokio::test]
    async fn test_create_log_stores_record() {
        let state = make_test_state();
        let payload = entry("error", "server-1234", "Failed to connect", "2023-09-15T08:00:00Z");

        let (status, Json(stored)) = create_log(State(state.clone()), Ok(Json(payload)))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(stored.level, LogLevel::Error);
        assert_eq!(stored.timestamp.as_str(), "2023-09-15T08:00:00Z");
        assert_eq!(state.store().len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_log_rejects_invalid_entry() {
        let state = make_test_state();

        let err = create_log(State(state.clone()), Ok(Json(json!({ "level": "loud" }))))
            .await
            .unwrap_err();

        let ApiError::InvalidRecord { details } = err else {
            unreachable!("expected a validation error");
        };
        assert_eq!(details.len(), 8);
        assert!(details.contains(&"Invalid level. Must be one of: error, warn, info, debug".to_string()));
        assert!(state.store().is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_list_logs_empty() {
        let state = make_test_state();
        let Json(records) = list_logs(State(state), query(&[])).await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_logs_filters_and_orders() {
        let state = make_test_state();
        for (level, resource, ts) in [
            ("error", "api", "2024-01-01T10:00:00Z"),
            ("info", "api", "2024-01-01T11:00:00Z"),
            ("error", "api-gateway", "2024-01-01T12:00:00Z"),
            ("error", "worker", "2024-01-01T13:00:00Z"),
        ] {
            create_log(State(state.clone()), Ok(Json(entry(level, resource, "boom", ts))))
                .await
                .unwrap();
        }

        let Json(records) = list_logs(
            State(state),
            query(&[("level", "error"), ("resourceId", "API")]),
        )
        .await
        .unwrap();

        let stamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["2024-01-01T12:00:00Z", "2024-01-01T10:00:00Z"]);
    }

    #[tokio::test]
    async fn test_list_logs_rejects_inverted_range() {
        let state = make_test_state();
        let err = list_logs(
            State(state),
            query(&[("timestamp_start", "2024-01-02"), ("timestamp_end", "2024-01-01")]),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ApiError::InvalidQuery { ref details } if details == &["timestamp_start must be before timestamp_end"]
        ));
    }

    #[tokio::test]
    async fn test_not_found_keeps_query_string() {
        let uri: Uri = "/missing?x=1".parse().unwrap();
        let err = not_found(uri).await;

        assert!(matches!(err, ApiError::NotFound(ref route) if route == "/missing?x=1"));
    }
}
