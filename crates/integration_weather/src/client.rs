//! OpenWeatherMap forecast client
//!
//! HTTP client for the OpenWeatherMap 5 day / 3 hour forecast API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::ForecastResponse;

/// City queried by the health check
const HEALTH_PROBE_CITY: &str = "Brasília";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The weather service answered with a non-2xx status
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The city name is blank
    #[error("City name must not be empty")]
    EmptyCity,
}

impl WeatherError {
    /// Upstream HTTP status, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// ISO country code appended to every city query (default: BR)
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Language of condition descriptions (default: pt_br)
    #[serde(default = "default_language")]
    pub language: String,

    /// Unit system (default: metric)
    #[serde(default = "default_units")]
    pub units: String,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
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

impl Default for WeatherConfig {
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

/// Weather client trait for fetching forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the 5 day / 3 hour forecast for a city in the configured country
    async fn get_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.is_none() {
            warn!("No OpenWeatherMap API key configured, requests will be rejected upstream");
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// The `q` parameter: city and country code
    fn location_query(&self, city: &str) -> String {
        format!("{},{}", city.trim(), self.config.country_code)
    }

    /// Query parameters for a forecast request, `appid` last
    fn query_params(&self, city: &str, count: Option<u8>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.location_query(city)),
            ("lang", self.config.language.clone()),
            ("units", self.config.units.clone()),
        ];
        if let Some(cnt) = count {
            params.push(("cnt", cnt.to_string()));
        }
        if let Some(ref key) = self.config.api_key {
            params.push(("appid", key.clone()));
        }
        params
    }

    async fn request(
        &self,
        city: &str,
        count: Option<u8>,
    ) -> Result<ForecastResponse, WeatherError> {
        if city.trim().is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let url = format!("{}/forecast", self.config.base_url);
        // appid stays out of the logs
        debug!(url = %url, q = %self.location_query(city), "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(city, count))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    WeatherError::ConnectionFailed(e.to_string())
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), fields(city = %city))]
    async fn get_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        let forecast = self.request(city, None).await?;
        debug!(
            entries = forecast.list.len(),
            resolved = %forecast.city.name,
            "Received forecast"
        );
        Ok(forecast)
    }

    async fn is_healthy(&self) -> bool {
        self.request(HEALTH_PROBE_CITY, Some(1)).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_key() -> OpenWeatherClient {
        OpenWeatherClient::new(WeatherConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        })
        .expect("client creation should succeed")
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.country_code, "BR");
        assert_eq!(config.language, "pt_br");
        assert_eq!(config.units, "metric");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_location_query_appends_country() {
        let client = client_with_key();
        assert_eq!(client.location_query("Recife"), "Recife,BR");
        assert_eq!(client.location_query(" São Paulo "), "São Paulo,BR");
    }

    #[test]
    fn test_query_params() {
        let client = client_with_key();
        let params = client.query_params("Recife", Some(1));

        assert!(params.contains(&("q", "Recife,BR".to_string())));
        assert!(params.contains(&("lang", "pt_br".to_string())));
        assert!(params.contains(&("units", "metric".to_string())));
        assert!(params.contains(&("cnt", "1".to_string())));
        assert_eq!(params.last(), Some(&("appid", "test-key".to_string())));
    }

    #[test]
    fn test_query_params_without_key() {
        let client = OpenWeatherClient::with_defaults().expect("client creation should succeed");
        let params = client.query_params("Recife", None);
        assert!(params.iter().all(|(k, _)| *k != "appid" && *k != "cnt"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = WeatherConfig {
            api_key: Some("super-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_config_serialization_skips_key() {
        let config = WeatherConfig {
            api_key: Some("super-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).expect("should serialize");
        assert!(!json.contains("super-secret"));

        let back: WeatherConfig = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back.country_code, "BR");
        assert!(back.api_key.is_none());
    }

    #[test]
    fn test_weather_error_status() {
        let err = WeatherError::Upstream {
            status: 404,
            body: "city not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert_eq!(WeatherError::ParseError("x".into()).status(), None);
    }
}
