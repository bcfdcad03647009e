//! Device-side settings for the sync client.

use std::time::Duration;

use application::SyncConfig;
use serde::{Deserialize, Serialize};

/// Sync client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Céu Azul backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Foreground sync period in seconds
    #[serde(default = "default_foreground_interval")]
    pub foreground_interval_secs: u64,

    /// Background sync period in seconds
    #[serde(default = "default_background_interval")]
    pub background_interval_secs: u64,

    /// How long an identical alert stays suppressed, in seconds
    #[serde(default = "default_dedup_window")]
    pub dedup_window_secs: u64,

    /// SQLite file holding the user id and cached forecast
    #[serde(default = "default_device_db_path")]
    pub device_db_path: String,
}

fn default_backend_url() -> String {
    "http://localhost:3000".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_foreground_interval() -> u64 {
    30
}

const fn default_background_interval() -> u64 {
    5 * 60
}

const fn default_dedup_window() -> u64 {
    24 * 60 * 60
}

fn default_device_db_path() -> String {
    "ceu_azul_device.db".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
            foreground_interval_secs: default_foreground_interval(),
            background_interval_secs: default_background_interval(),
            dedup_window_secs: default_dedup_window(),
            device_db_path: default_device_db_path(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Foreground period, never shorter than one second
    #[must_use]
    pub fn foreground_interval(&self) -> Duration {
        Duration::from_secs(self.foreground_interval_secs.max(1))
    }

    /// Background period, never shorter than one second
    #[must_use]
    pub fn background_interval(&self) -> Duration {
        Duration::from_secs(self.background_interval_secs.max(1))
    }

    #[must_use]
    pub const fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            dedup_window: Duration::from_secs(self.dedup_window_secs),
        }
    }
}
