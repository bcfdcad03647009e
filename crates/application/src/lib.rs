//! Application layer - Use cases and orchestration
//!
//! Contains the forecast refresh and alerting use cases, the client sync
//! loop logic, forecast presentation, and the port definitions the
//! infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
