//! City search on the client
//!
//! Verifies a city through the backend, caches the returned forecast on
//! the device and serves that cache when the backend is unreachable.

use std::sync::Arc;

use domain::{CityName, ForecastSnapshot, UserId};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DeviceStatePort, WeatherBackendPort};
use crate::services::sync_service::{LAST_FORECAST_KEY, USER_ID_KEY};

/// Search failures, displayed as the message shown to the user
#[derive(Debug, Error)]
pub enum SearchError {
    /// No user id has been stored on this device yet
    #[error("Erro: ID do usuário não encontrado.")]
    MissingUserId,

    /// The typed city name is not usable
    #[error("Erro: Cidade não encontrada ou dados ausentes.")]
    InvalidCity,

    /// The backend answered with an error status
    #[error("Erro ao verificar cidade: {body}")]
    Rejected { status: Option<u16>, body: String },

    /// The backend answered without forecast data
    #[error("Erro: Cidade não encontrada ou dados ausentes.")]
    NoData,

    /// The backend could not be reached
    #[error("Erro: Não foi possível verificar a cidade.")]
    Unreachable(#[source] ApplicationError),

    /// Device storage failed
    #[error("Erro: Não foi possível verificar a cidade.")]
    Device(#[source] ApplicationError),
}

impl From<ApplicationError> for SearchError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Fetch {
                status: Some(status),
                body,
            } => Self::Rejected {
                status: Some(status),
                body,
            },
            ApplicationError::NotFound(_) => Self::NoData,
            other => Self::Unreachable(other),
        }
    }
}

/// Client-side city search
pub struct CitySearchService {
    backend: Arc<dyn WeatherBackendPort>,
    device: Arc<dyn DeviceStatePort>,
}

impl std::fmt::Debug for CitySearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitySearchService").finish_non_exhaustive()
    }
}

impl CitySearchService {
    #[must_use]
    pub fn new(backend: Arc<dyn WeatherBackendPort>, device: Arc<dyn DeviceStatePort>) -> Self {
        Self { backend, device }
    }

    async fn stored_user_id(&self) -> Result<UserId, SearchError> {
        let raw = self
            .device
            .get(USER_ID_KEY)
            .await
            .map_err(SearchError::Device)?
            .ok_or(SearchError::MissingUserId)?;
        UserId::parse(&raw).map_err(|_| SearchError::MissingUserId)
    }

    /// Verify a city and cache its forecast as the last one shown
    #[instrument(skip(self))]
    pub async fn search(&self, city: &str) -> Result<ForecastSnapshot, SearchError> {
        let user_id = self.stored_user_id().await?;
        let city = CityName::parse(city).map_err(|_| SearchError::InvalidCity)?;

        let snapshot = self.backend.verify_city(&user_id, &city).await?;

        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(e) = self.device.set(LAST_FORECAST_KEY, &json).await {
                    warn!(error = %e, "Failed to cache forecast on device");
                }
            },
            Err(e) => warn!(error = %e, "Failed to serialize forecast for caching"),
        }

        info!(city = %city, entries = snapshot.len(), "City found");
        Ok(snapshot)
    }

    /// The last forecast cached on the device, if any
    ///
    /// A cache entry that no longer parses is treated as absent.
    pub async fn load_offline(&self) -> Result<Option<ForecastSnapshot>, ApplicationError> {
        let Some(json) = self.device.get(LAST_FORECAST_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(error = %e, "Cached forecast is unreadable");
                Ok(None)
            },
        }
    }
}
