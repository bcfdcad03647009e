//! Forecast snapshot and 3-hour forecast entries

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// One weather condition attached to a forecast entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDescriptor {
    /// Provider condition id (e.g. 502 for heavy rain)
    pub id: u32,
    /// Condition group ("Rain", "Clouds", ...)
    pub main: String,
    /// Free-text description in the configured language
    pub description: String,
    /// Provider icon code (e.g. "10d")
    pub icon: String,
}

/// One 3-hour-resolution weather sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds, UTC) of the sample
    pub timestamp: i64,
    /// Point temperature
    pub temperature: f64,
    /// Perceived temperature
    #[serde(default)]
    pub feels_like: f64,
    /// Minimum temperature within the sample window
    pub temp_min: f64,
    /// Maximum temperature within the sample window
    pub temp_max: f64,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Wind speed (m/s in metric units)
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: u16,
    /// Wind gust speed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    /// Cloud cover percentage
    pub cloud_cover: u8,
    /// Visibility in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
    /// Probability of precipitation (0.0 - 1.0)
    #[serde(default)]
    pub precipitation_probability: f64,
    /// Rain volume over the last 3 hours in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain_3h: Option<f64>,
    /// Snow volume over the last 3 hours in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow_3h: Option<f64>,
    /// Weather conditions, the first one being the primary
    pub conditions: Vec<WeatherDescriptor>,
}

impl ForecastEntry {
    /// Sample time in UTC, `None` if the timestamp is out of range
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Calendar date of the sample in UTC
    #[must_use]
    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.time().map(|t| t.date_naive())
    }

    /// Calendar date of the sample at the given offset
    #[must_use]
    pub fn local_date(&self, offset: FixedOffset) -> Option<NaiveDate> {
        self.time().map(|t| t.with_timezone(&offset).date_naive())
    }

    /// The primary weather condition, if the provider sent any
    #[must_use]
    pub fn primary_condition(&self) -> Option<&WeatherDescriptor> {
        self.conditions.first()
    }

    /// Description of the primary condition, empty when absent
    #[must_use]
    pub fn description(&self) -> &str {
        self.primary_condition()
            .map_or("", |c| c.description.as_str())
    }
}

/// Geographic coordinates of a city
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// City metadata returned alongside a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    /// Provider city id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Resolved city name
    pub name: String,
    /// ISO country code
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub utc_offset_secs: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    /// Sunrise as a Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    /// Sunset as a Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
}

impl CityInfo {
    /// The city's UTC offset, UTC itself if the stored value is out of range
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}

/// The full ordered set of entries for a city at one fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub city: CityInfo,
    pub entries: Vec<ForecastEntry>,
}

impl ForecastSnapshot {
    /// Number of forecast entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot carries no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose UTC date equals `date`
    pub fn entries_on_utc_date(&self, date: NaiveDate) -> impl Iterator<Item = &ForecastEntry> {
        self.entries
            .iter()
            .filter(move |e| e.utc_date() == Some(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: i64, description: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temperature: 25.0,
            feels_like: 26.0,
            temp_min: 24.0,
            temp_max: 26.0,
            pressure: 1012,
            humidity: 80,
            wind_speed: 3.5,
            wind_direction: 120,
            wind_gust: None,
            cloud_cover: 40,
            visibility: Some(10_000),
            precipitation_probability: 0.2,
            rain_3h: None,
            snow_3h: None,
            conditions: vec![WeatherDescriptor {
                id: 800,
                main: "Clear".to_string(),
                description: description.to_string(),
                icon: "01d".to_string(),
            }],
        }
    }

    #[test]
    fn utc_date_from_timestamp() {
        // 2024-01-15T23:00:00Z
        let e = entry(1_705_359_600, "ceu limpo");
        assert_eq!(e.utc_date(), NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn local_date_respects_offset() {
        // 2024-01-16T01:00:00Z is still the 15th in Brasília (UTC-3)
        let e = entry(1_705_366_800, "ceu limpo");
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(e.local_date(brt), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(e.utc_date(), NaiveDate::from_ymd_opt(2024, 1, 16));
    }

    #[test]
    fn description_falls_back_to_empty() {
        let mut e = entry(0, "chuva");
        assert_eq!(e.description(), "chuva");
        e.conditions.clear();
        assert_eq!(e.description(), "");
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let city = CityInfo {
            id: None,
            name: "Nowhere".to_string(),
            country: "BR".to_string(),
            coordinates: None,
            utc_offset_secs: 999_999,
            population: None,
            sunrise: None,
            sunset: None,
        };
        assert_eq!(city.utc_offset().local_minus_utc(), 0);
    }

    #[test]
    fn entries_on_utc_date_filters() {
        let snapshot = ForecastSnapshot {
            city: CityInfo {
                id: Some(1),
                name: "Recife".to_string(),
                country: "BR".to_string(),
                coordinates: None,
                utc_offset_secs: -10_800,
                population: None,
                sunrise: None,
                sunset: None,
            },
            entries: vec![entry(1_705_359_600, "a"), entry(1_705_366_800, "b")],
        };
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let on_day: Vec<_> = snapshot.entries_on_utc_date(day).collect();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].description(), "a");
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let json = serde_json::to_value(entry(0, "x")).unwrap();
        assert!(json.get("rain_3h").is_none());
        assert!(json.get("visibility").is_some());
    }
}
