//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, middleware::request_id, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::banner))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Verification API
        .route("/verify/city/{city}", post(handlers::verify::verify_city))
        .route(
            "/verify/notification",
            post(handlers::verify::verify_notification),
        )
        // Every response carries X-Request-Id
        .layer(axum::middleware::from_fn(request_id))
        // Attach state
        .with_state(state)
}
