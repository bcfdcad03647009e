//! Céu Azul HTTP presentation layer
//!
//! This crate provides the backend HTTP API used by the mobile client.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId, request_id};
pub use routes::create_router;
pub use state::AppState;
