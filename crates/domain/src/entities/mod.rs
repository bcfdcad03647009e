//! Domain entities - Objects with identity and lifecycle

mod alert;
mod city_subscription;
mod forecast;

pub use alert::Alert;
pub use city_subscription::CitySubscription;
pub use forecast::{CityInfo, Coordinates, ForecastEntry, ForecastSnapshot, WeatherDescriptor};
