//! Health check endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /api/health` — liveness check with the core crate version.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: hawar_core::version().into(),
    })
}
