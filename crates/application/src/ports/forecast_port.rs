//! Forecast retrieval port
//!
//! Defines the interface for fetching a city's forecast from the weather API.

use async_trait::async_trait;
use domain::{CityName, ForecastSnapshot};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch the multi-day forecast for a city
    ///
    /// Issues exactly one upstream request. Failures carry the upstream
    /// status and body as [`ApplicationError::Fetch`]; no retry happens here.
    async fn fetch_forecast(&self, city: &CityName) -> Result<ForecastSnapshot, ApplicationError>;

    /// Check if the weather service is reachable
    async fn is_available(&self) -> bool;
}
