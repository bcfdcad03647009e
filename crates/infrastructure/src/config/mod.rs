//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `weather`: OpenWeatherMap client and hazard keywords
//! - `client`: sync client intervals, backend URL and device storage
//!
//! Sources, lowest precedence first: built-in defaults, the `PORT` and
//! `OPENWEATHER_API_KEY` fallbacks, an optional `config.toml`, then
//! `CEU_AZUL_*` environment variables with `__` between nested keys.

mod client;
mod database;
mod server;
mod weather;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use weather::{AlertsConfig, WeatherAppConfig};

/// Environment variable prefix for all settings
pub const ENV_PREFIX: &str = "CEU_AZUL";

/// Plain variable honoured for the server port
pub const PORT_VAR: &str = "PORT";

/// Plain variable honoured for the OpenWeatherMap key
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info,tower_http=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// OpenWeatherMap configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Hazard detection configuration
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Sync client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Some("config"), None)
    }

    /// Load configuration from an optional file and an environment map
    ///
    /// When `vars` is `None` the process environment is read.
    pub fn load_from(
        file: Option<&str>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let lookup = |name: &str| match &vars {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };

        let port = lookup(PORT_VAR)
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or_else(server::default_port);

        let mut builder = config::Config::builder().set_default("server.port", i64::from(port))?;

        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            builder = builder.set_default("weather.api_key", key)?;
        }

        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        // e.g. CEU_AZUL_SERVER__PORT, CEU_AZUL_ALERTS__HAZARD_KEYWORDS=a,b
        let builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("alerts.hazard_keywords")
                .try_parsing(true)
                .source(vars),
        );

        builder.build()?.try_deserialize()
    }
}
