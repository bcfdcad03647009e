//! Backend API port used by the client
//!
//! Mirrors the two HTTP endpoints the server exposes.

use async_trait::async_trait;
use domain::{Alert, CityName, ForecastSnapshot, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for talking to the Céu Azul backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherBackendPort: Send + Sync {
    /// Refresh every saved city of the user and return today's alerts
    async fn refresh_and_alert(&self, user_id: &UserId) -> Result<Vec<Alert>, ApplicationError>;

    /// Fetch, save and return the forecast of one city
    async fn verify_city(
        &self,
        user_id: &UserId,
        city: &CityName,
    ) -> Result<ForecastSnapshot, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherBackendPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherBackendPort>();
    }
}
