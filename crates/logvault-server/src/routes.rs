//! Route configuration for the log API.

use axum::routing::{get, post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::{create_log, health_check, list_logs, not_found};
use crate::state::AppState;

/// Create the log API router.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(state.config());

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/logs",
            post(create_log).get(list_logs).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use logvault_core::{shared_memory_store, FileLogStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn make_test_state() -> AppState {
        AppState::new(ServerConfig::default(), shared_memory_store())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/logs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn entry(timestamp: &str) -> Value {
        json!({
            "level": "warn",
            "message": "Connection Timeout",
            "resourceId": "api",
            "timestamp": timestamp,
            "traceId": "abc-xyz-123",
            "spanId": "span-456",
            "commit": "5e5342f",
            "metadata": {}
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(make_test_state());
        let (status, json) = send(app, get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "OK");
        assert!(json["timestamp"].is_string());
        assert!(json["uptimeSecs"].is_u64());
    }

    #[tokio::test]
    async fn test_post_then_get() {
        let state = make_test_state();

        let (status, created) = send(
            create_router(state.clone()),
            post_json(&entry("2024-01-01T12:00:00Z").to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, entry("2024-01-01T12:00:00Z"));

        let (status, listed) = send(create_router(state), get_request("/logs?message=timeout")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([entry("2024-01-01T12:00:00Z")]));
    }

    #[tokio::test]
    async fn test_post_invalid_entry() {
        let app = create_router(make_test_state());
        let mut body = entry("2024-01-01T12:00:00Z");
        body["metadata"] = json!([1, 2]);

        let (status, json) = send(app, post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({ "error": "Validation failed", "details": ["Metadata must be an object"] })
        );
    }

    #[tokio::test]
    async fn test_post_malformed_json() {
        let app = create_router(make_test_state());
        let (status, json) = send(app, post_json("{ not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["details"], json!(["Request body must be a valid JSON object"]));
    }

    #[tokio::test]
    async fn test_post_array_body() {
        let app = create_router(make_test_state());
        let (status, json) = send(app, post_json("[]")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["details"], json!(["Request body must be a valid JSON object"]));
    }

    #[tokio::test]
    async fn test_get_invalid_query() {
        let app = create_router(make_test_state());
        let (status, json) = send(app, get_request("/logs?level=fatal&timestamp_start=nope")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({
                "error": "Invalid query parameters",
                "details": [
                    "Invalid level filter. Must be one of: error, warn, info, debug",
                    "Invalid timestamp_start format. Must be a valid ISO 8601 string"
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_get_ignores_empty_params() {
        let app = create_router(make_test_state());
        let (status, json) = send(app, get_request("/logs?level=&message=&timestamp_start=")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_get_corrupt_store_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.json");
        std::fs::write(&path, "{ definitely not an array").unwrap();

        let state = AppState::new(ServerConfig::default(), Arc::new(FileLogStore::with_path(&path)));
        let (status, json) = send(create_router(state.clone()), get_request("/logs")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Failed to retrieve logs");

        let (status, json) = send(
            create_router(state),
            post_json(&entry("2024-01-01T12:00:00Z").to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Failed to create log entry");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{ definitely not an array"
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_router(make_test_state());
        let (status, json) = send(app, get_request("/metrics")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Route /metrics not found");
    }

    #[tokio::test]
    async fn test_unsupported_method_on_logs() {
        let app = create_router(make_test_state());
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/logs")
            .body(Body::empty())
            .unwrap();

        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Route /logs not found");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let app = create_router(make_test_state());
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_allow_list() {
        let config = ServerConfig::default()
            .with_cors_origins(vec!["http://localhost:3000".to_string()]);
        let app = create_router(AppState::new(config, shared_memory_store()));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }
}
