//! Backend client - Implements WeatherBackendPort over HTTP
//!
//! Used by the client side to call the server's two verify endpoints.
//! Every request carries a fresh `X-Request-Id` for log correlation.

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::WeatherBackendPort;
use async_trait::async_trait;
use domain::{Alert, CityName, ForecastSnapshot, UserId};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Header name for request correlation ID
pub const X_REQUEST_ID: &str = "x-request-id";

#[derive(Serialize)]
struct UserBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
}

#[derive(Deserialize)]
struct NotificationResponse {
    #[serde(default)]
    alerts: Vec<Alert>,
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    exists: bool,
    #[serde(default)]
    data: Option<ForecastSnapshot>,
}

/// HTTP client for the Céu Azul backend
#[derive(Debug, Clone)]
pub struct HttpWeatherBackend {
    client: Client,
    base_url: Url,
}

impl HttpWeatherBackend {
    /// Create a client for the backend at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApplicationError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ApplicationError::Configuration(format!("Invalid backend URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApplicationError::Configuration(format!(
                "Backend URL '{base_url}' cannot be a base"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("CeuAzul/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApplicationError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApplicationError::Configuration("Backend URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_user(&self, url: Url, user_id: &UserId) -> Result<Response, ApplicationError> {
        let request_id = Uuid::new_v4();
        debug!(url = %url, request_id = %request_id, "Calling backend");

        let response = self
            .client
            .post(url)
            .header(X_REQUEST_ID, request_id.to_string())
            .json(&UserBody {
                user_id: user_id.as_str(),
            })
            .send()
            .await
            .map_err(|e| ApplicationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApplicationError::fetch(status.as_u16(), body));
        }

        Ok(response)
    }
}

#[async_trait]
impl WeatherBackendPort for HttpWeatherBackend {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn refresh_and_alert(&self, user_id: &UserId) -> Result<Vec<Alert>, ApplicationError> {
        let url = self.endpoint(&["verify", "notification"])?;
        let response = self.post_user(url, user_id).await?;

        let body: NotificationResponse = response
            .json()
            .await
            .map_err(|e| ApplicationError::Network(format!("Invalid backend response: {e}")))?;

        debug!(alerts = body.alerts.len(), "Received alerts");
        Ok(body.alerts)
    }

    #[instrument(skip(self), fields(user_id = %user_id, city = %city))]
    async fn verify_city(
        &self,
        user_id: &UserId,
        city: &CityName,
    ) -> Result<ForecastSnapshot, ApplicationError> {
        let url = self.endpoint(&["verify", "city", city.as_str()])?;
        let response = self.post_user(url, user_id).await?;

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| ApplicationError::Network(format!("Invalid backend response: {e}")))?;

        match body.data {
            Some(snapshot) if body.exists => Ok(snapshot),
            _ => Err(ApplicationError::NotFound(format!("forecast for {city}"))),
        }
    }
}
