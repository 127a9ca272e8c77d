//! Liveness endpoint. Never touches the upstream.

use axum::Json;
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "NASA TAP proxy server is running";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: HEALTH_MESSAGE,
    })
}
