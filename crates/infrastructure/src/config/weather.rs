//! OpenWeatherMap and hazard detection configuration.

use application::DEFAULT_HAZARD_KEYWORDS;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// OpenWeatherMap settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - falls back to `OPENWEATHER_API_KEY`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Country code appended to every city query
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Description language
    #[serde(default = "default_language")]
    pub language: String,

    /// Unit system
    #[serde(default = "default_units")]
    pub units: String,
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("country_code", &self.country_code)
            .field("language", &self.language)
            .field("units", &self.units)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_country_code() -> String {
    "BR".to_string()
}

fn default_language() -> String {
    "pt_br".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            country_code: default_country_code(),
            language: default_language(),
            units: default_units(),
        }
    }
}

impl WeatherAppConfig {
    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Convert to the integration client's configuration
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            country_code: self.country_code.clone(),
            language: self.language.clone(),
            units: self.units.clone(),
        }
    }
}

/// Severe-weather detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Phrases that mark a forecast description as hazardous
    #[serde(default = "default_hazard_keywords")]
    pub hazard_keywords: Vec<String>,
}

fn default_hazard_keywords() -> Vec<String> {
    DEFAULT_HAZARD_KEYWORDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            hazard_keywords: default_hazard_keywords(),
        }
    }
}
