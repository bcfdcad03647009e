//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Plain-text liveness banner served at `/`
pub const BANNER: &str = "Servidor Backend está rodando!";

/// Root liveness banner
pub async fn banner() -> &'static str {
    BANNER
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub store: ServiceStatus,
    pub weather: ServiceStatus,
}

/// Status of a dependency
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
}

/// Readiness check - can the server reach its store and the weather API?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (store_healthy, weather_healthy) = state.update_service.is_ready().await;

    let ready = store_healthy && weather_healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            store: ServiceStatus {
                healthy: store_healthy,
            },
            weather: ServiceStatus {
                healthy: weather_healthy,
            },
        }),
    )
}
