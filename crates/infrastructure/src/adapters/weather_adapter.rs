//! Weather adapter - Implements ForecastPort using integration_weather

use application::error::ApplicationError;
use application::ports::ForecastPort;
use async_trait::async_trait;
use domain::{
    CityInfo, CityName, Coordinates, ForecastEntry, ForecastSnapshot, WeatherDescriptor,
};
use integration_weather::{
    ForecastItem, ForecastResponse, OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Status reported when the provider's 2xx body cannot be read
const BAD_GATEWAY: u16 = 502;

/// Adapter for forecasts from the OpenWeatherMap API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenWeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::Upstream { status, body } => ApplicationError::fetch(status, body),
            WeatherError::ParseError(e) => ApplicationError::fetch(BAD_GATEWAY, e),
            WeatherError::ConnectionFailed(e) | WeatherError::RequestFailed(e) => {
                ApplicationError::Fetch {
                    status: None,
                    body: e,
                }
            },
            WeatherError::EmptyCity => {
                ApplicationError::Validation("city must not be empty".into())
            },
        }
    }

    fn map_entry(item: ForecastItem) -> ForecastEntry {
        let wind = item.wind;
        ForecastEntry {
            timestamp: item.dt,
            temperature: item.main.temp,
            feels_like: item.main.feels_like.unwrap_or(item.main.temp),
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            pressure: item.main.pressure,
            humidity: item.main.humidity,
            wind_speed: wind.map_or(0.0, |w| w.speed),
            wind_direction: wind.map_or(0, |w| w.deg),
            wind_gust: wind.and_then(|w| w.gust),
            cloud_cover: item.clouds.map_or(0, |c| c.all),
            visibility: item.visibility,
            precipitation_probability: item.pop.unwrap_or(0.0),
            rain_3h: item.rain.and_then(|r| r.three_hours),
            snow_3h: item.snow.and_then(|s| s.three_hours),
            conditions: item
                .weather
                .into_iter()
                .map(|c| WeatherDescriptor {
                    id: c.id,
                    main: c.main,
                    description: c.description,
                    icon: c.icon,
                })
                .collect(),
        }
    }

    /// Convert a provider response to a domain snapshot, keeping entry order
    pub(crate) fn map_response(response: ForecastResponse) -> ForecastSnapshot {
        let city = response.city;
        ForecastSnapshot {
            city: CityInfo {
                id: city.id,
                name: city.name,
                country: city.country,
                coordinates: city.coord.map(|c| Coordinates {
                    latitude: c.lat,
                    longitude: c.lon,
                }),
                utc_offset_secs: city.timezone,
                population: city.population,
                sunrise: city.sunrise,
                sunset: city.sunset,
            },
            entries: response.list.into_iter().map(Self::map_entry).collect(),
        }
    }
}

#[async_trait]
impl ForecastPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch_forecast(&self, city: &CityName) -> Result<ForecastSnapshot, ApplicationError> {
        let result = self
            .client
            .get_forecast(city.as_str())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(response) => debug!(entries = response.list.len(), "Retrieved forecast"),
            Err(e) => debug!(error = %e, "Failed to get forecast"),
        }

        result.map(Self::map_response)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
