//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! Used by load balancers and orchestrators to verify the service is alive.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of a successful liveness probe, always `{"status":"OK"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const OK: &'static str = "OK";

    pub fn ok() -> Self {
        Self { status: Self::OK }
    }
}

/// Health check handler.
///
/// This is a liveness probe: it reads nothing from the request and only
/// checks that the process can respond to HTTP.
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_200_ok() {
        let (status, Json(body)) = health().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, HealthResponse { status: "OK" });
    }

    #[test]
    fn health_response_serializes_to_status_object() {
        let json = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"OK"}"#);
    }
}
