//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite storage,
//! the OpenWeatherMap adapter, the backend HTTP client and local
//! notifications. Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AlertsConfig, AppConfig, ClientConfig, DatabaseConfig, LogFormat, LoggingConfig,
    ServerConfig, WeatherAppConfig,
};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteCityStore, SqliteDeviceState, create_pool,
};
pub use telemetry::init_logging;
