//! Forecast refresh and alerting
//!
//! Orchestrates fetch → store → detect for a user's saved cities. Cities
//! are processed sequentially in listing order, and a failure for one city
//! never aborts the batch.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use domain::{Alert, CityName, ForecastSnapshot, UserId};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CityStorePort, ForecastPort};
use crate::services::severe_weather::SevereWeatherDetector;

/// Outcome of refreshing all of a user's cities
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    /// Alerts for every city that got far enough to be evaluated
    pub alerts: Vec<Alert>,
    /// Number of saved cities
    pub city_count: usize,
    /// Cities whose forecast could not be fetched
    pub skipped: Vec<String>,
    /// Cities fetched but not stored; their previous snapshot is kept
    pub store_failures: Vec<String>,
}

impl RefreshReport {
    /// Whether the user has no saved cities
    #[must_use]
    pub const fn has_no_cities(&self) -> bool {
        self.city_count == 0
    }
}

/// Service refreshing forecasts and raising severe-weather alerts
pub struct ForecastUpdateService {
    forecasts: Arc<dyn ForecastPort>,
    store: Arc<dyn CityStorePort>,
    detector: SevereWeatherDetector,
}

impl std::fmt::Debug for ForecastUpdateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastUpdateService")
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}

/// Parse a required user id, mapping absence to a validation error
fn require_user_id(user_id: Option<&str>) -> Result<UserId, ApplicationError> {
    let raw = user_id.ok_or_else(|| ApplicationError::Validation("userId is required".into()))?;
    UserId::parse(raw).map_err(|e| ApplicationError::Validation(e.to_string()))
}

/// Parse a required city name, mapping absence to a validation error
fn require_city(city: Option<&str>) -> Result<CityName, ApplicationError> {
    let raw = city.ok_or_else(|| ApplicationError::Validation("city is required".into()))?;
    CityName::parse(raw).map_err(|e| ApplicationError::Validation(e.to_string()))
}

impl ForecastUpdateService {
    /// Create a new update service
    #[must_use]
    pub fn new(
        forecasts: Arc<dyn ForecastPort>,
        store: Arc<dyn CityStorePort>,
        detector: SevereWeatherDetector,
    ) -> Self {
        Self {
            forecasts,
            store,
            detector,
        }
    }

    /// Refresh every saved city of a user and collect today's alerts
    ///
    /// "Today" is the server's current UTC date.
    pub async fn refresh_and_alert(
        &self,
        user_id: Option<&str>,
    ) -> Result<RefreshReport, ApplicationError> {
        self.refresh_and_alert_on(user_id, Utc::now().date_naive())
            .await
    }

    /// Refresh every saved city of a user, evaluating alerts for `today`
    ///
    /// Fails as a whole only when `user_id` is absent or invalid, or when
    /// the city listing itself fails.
    #[instrument(skip(self), fields(user_id = ?user_id))]
    pub async fn refresh_and_alert_on(
        &self,
        user_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<RefreshReport, ApplicationError> {
        let user_id = require_user_id(user_id)?;
        info!(user_id = %user_id, "Starting forecast refresh");

        let cities = self.store.list_cities(&user_id).await?;
        let mut report = RefreshReport {
            city_count: cities.len(),
            ..RefreshReport::default()
        };

        if cities.is_empty() {
            info!(user_id = %user_id, "No cities saved for user");
            return Ok(report);
        }

        for city in cities {
            debug!(city = %city, "Refreshing city");

            let snapshot = match self.forecasts.fetch_forecast(&city).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(city = %city, error = %e, "Forecast fetch failed, skipping city");
                    report.skipped.push(city.to_string());
                    continue;
                },
            };

            if let Err(e) = self.store.save_snapshot(&user_id, &city, &snapshot).await {
                error!(
                    city = %city,
                    error = %e,
                    "Failed to store forecast, previous snapshot retained"
                );
                report.store_failures.push(city.to_string());
            }

            if let Some(alert) = self.detector.detect(city.as_str(), &snapshot, today) {
                info!(
                    city = %city,
                    matches = alert.details.len(),
                    "Severe weather detected"
                );
                report.alerts.push(alert);
            }
        }

        info!(
            user_id = %user_id,
            cities = report.city_count,
            alerts = report.alerts.len(),
            skipped = report.skipped.len(),
            "Forecast refresh completed"
        );
        Ok(report)
    }

    /// Fetch a city's forecast once, store it, and return it
    ///
    /// Both arguments are validated before the weather API is contacted.
    /// Fetch failures are returned unchanged so callers can surface the
    /// upstream status and body.
    #[instrument(skip(self), fields(user_id = ?user_id, city = ?city))]
    pub async fn verify_and_save_city(
        &self,
        user_id: Option<&str>,
        city: Option<&str>,
    ) -> Result<ForecastSnapshot, ApplicationError> {
        let user_id = require_user_id(user_id)?;
        let city = require_city(city)?;

        let snapshot = self.forecasts.fetch_forecast(&city).await?;
        self.store.save_snapshot(&user_id, &city, &snapshot).await?;

        info!(
            user_id = %user_id,
            city = %city,
            entries = snapshot.len(),
            "City verified and saved"
        );
        Ok(snapshot)
    }

    /// Whether the weather API and the store are both reachable
    pub async fn is_ready(&self) -> (bool, bool) {
        let store = self.store.is_healthy().await;
        let weather = self.forecasts.is_available().await;
        (store, weather)
    }
}
