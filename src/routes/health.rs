/**
 * Health Routes
 * Endpoints for checking backend health status
 */
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::AppState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// Single service check result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health - liveness ping
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
        uptime_secs: SERVER_START.elapsed().as_secs(),
    })
}

/// GET /health/database - round-trip ping to the document store
pub async fn health_database(State(state): State<AppState>) -> impl IntoResponse {
    match crate::db::health_check(&state.db).await {
        Ok(duration) => (
            StatusCode::OK,
            Json(ServiceCheck {
                status: "healthy".to_string(),
                response_time: Some(duration.as_millis() as u64),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!("database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ServiceCheck {
                    status: "unhealthy".to_string(),
                    response_time: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
