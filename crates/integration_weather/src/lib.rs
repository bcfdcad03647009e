//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap 5 day / 3 hour forecast API
//! (<https://openweathermap.org/forecast5>). Cities are queried by name
//! within a configured country, with descriptions in a configured language.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    City, Clouds, Condition, Coord, ForecastItem, ForecastResponse, MainReadings, Volume, Wind,
};
