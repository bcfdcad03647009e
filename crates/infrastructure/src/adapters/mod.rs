//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod backend_client;
mod notification_adapter;
mod weather_adapter;

pub use backend_client::{HttpWeatherBackend, X_REQUEST_ID};
pub use notification_adapter::TracingNotifier;
pub use weather_adapter::WeatherAdapter;
