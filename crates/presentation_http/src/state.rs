//! Application state shared across handlers

use std::sync::Arc;

use application::ForecastUpdateService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Forecast refresh and city verification
    pub update_service: Arc<ForecastUpdateService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
