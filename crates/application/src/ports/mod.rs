//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod city_store_port;
mod device_state_port;
mod forecast_port;
mod notification_port;
mod weather_backend_port;

#[cfg(test)]
pub use city_store_port::MockCityStorePort;
pub use city_store_port::CityStorePort;
#[cfg(test)]
pub use device_state_port::MockDeviceStatePort;
pub use device_state_port::DeviceStatePort;
#[cfg(test)]
pub use forecast_port::MockForecastPort;
pub use forecast_port::ForecastPort;
#[cfg(test)]
pub use notification_port::MockNotificationPort;
pub use notification_port::{LocalNotification, NotificationPort};
#[cfg(test)]
pub use weather_backend_port::MockWeatherBackendPort;
pub use weather_backend_port::WeatherBackendPort;
