//! Application services - Use case implementations

mod forecast_presentation;
mod forecast_update_service;
mod search_service;
mod severe_weather;
mod sync_service;

pub use forecast_presentation::{
    DailySummary, DayNavigator, classify_wind_speed, entries_for_day, format_long_date,
    format_short_date, group_by_day, icon_url, narrate_day, narrate_entry, summarize,
};
pub use forecast_update_service::{ForecastUpdateService, RefreshReport};
pub use search_service::{CitySearchService, SearchError};
pub use severe_weather::{
    DEFAULT_HAZARD_KEYWORDS, HazardReport, SevereWeatherDetector, alert_message,
};
pub use sync_service::{
    ALERT_ROUTE, ALERT_TITLE, LAST_FORECAST_KEY, SyncConfig, SyncOutcome, SyncService,
    USER_ID_KEY, notification_for,
};
