use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Instant;

/// Server start time (shared across all health checks)
static SERVER_START_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize server start time
pub fn init_server_start_time() {
    let _ = SERVER_START_TIME.set(Instant::now());
}

/// Get server uptime in seconds
fn get_uptime_seconds() -> u64 {
    SERVER_START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Health check endpoint
///
/// Returns 200 OK without touching GitHub
pub async fn health() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        service: "reviewdesk".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: get_uptime_seconds(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        init_server_start_time();

        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
