//! Weather data models
//!
//! Types mirroring the OpenWeatherMap 5 day / 3 hour forecast response.
//! Only the fields the application uses are modelled; unknown fields are
//! ignored.

use serde::{Deserialize, Serialize};

/// Top-level forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Forecast samples at 3-hour steps, oldest first
    #[serde(default)]
    pub list: Vec<ForecastItem>,
    /// City the provider resolved the query to
    pub city: City,
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Unix timestamp (UTC) of the sample
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Visibility in meters
    #[serde(default)]
    pub visibility: Option<u32>,
    /// Probability of precipitation (0.0 - 1.0)
    #[serde(default)]
    pub pop: Option<f64>,
    #[serde(default)]
    pub rain: Option<Volume>,
    #[serde(default)]
    pub snow: Option<Volume>,
    /// Sample time as text, e.g. "2024-01-15 12:00:00"
    #[serde(default)]
    pub dt_txt: Option<String>,
}

/// Temperature, pressure and humidity readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Pressure in hPa
    #[serde(default)]
    pub pressure: u32,
    /// Relative humidity percentage
    #[serde(default)]
    pub humidity: u8,
}

/// Weather condition as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    /// Description in the requested language
    pub description: String,
    pub icon: String,
}

/// Cloud cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloudiness percentage
    pub all: u8,
}

/// Wind readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Direction in degrees
    #[serde(default)]
    pub deg: u16,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// Precipitation volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume over the last 3 hours in mm
    #[serde(rename = "3h", default)]
    pub three_hours: Option<f64>,
}

/// City metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub coord: Option<Coord>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub population: Option<u64>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}
