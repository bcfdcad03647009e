//! Forecast presentation
//!
//! Pure aggregation and text rendering over a [`ForecastSnapshot`]: daily
//! summaries, bounded day navigation, wind classification and the
//! Portuguese narration handed to a speech service.

use std::collections::HashMap;

use chrono::{Datelike, FixedOffset, NaiveDate, Weekday};
use domain::{ForecastEntry, ForecastSnapshot, WeatherDescriptor};
use serde::Serialize;

/// Base URL for provider condition icons
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Aggregated figures for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Minimum of the entries' minimums, one decimal
    pub temp_min: f64,
    /// Mean of the entries' point temperatures, one decimal
    pub temp_avg: f64,
    /// Maximum of the entries' maximums, one decimal
    pub temp_max: f64,
    /// Condition of the first entry seen for the day
    pub condition: Option<WeatherDescriptor>,
    pub entry_count: usize,
}

struct DayAccumulator {
    date: NaiveDate,
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
    condition: Option<WeatherDescriptor>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Group entries by calendar date at `offset`
///
/// Days are returned in order of first appearance. Entries with an
/// out-of-range timestamp are ignored.
#[must_use]
pub fn group_by_day(entries: &[ForecastEntry], offset: FixedOffset) -> Vec<DailySummary> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut days: Vec<DayAccumulator> = Vec::new();

    for entry in entries {
        let Some(date) = entry.local_date(offset) else {
            continue;
        };

        match index.get(&date) {
            Some(&i) => {
                let day = &mut days[i];
                day.min = day.min.min(entry.temp_min);
                day.max = day.max.max(entry.temp_max);
                day.sum += entry.temperature;
                day.count += 1;
            },
            None => {
                index.insert(date, days.len());
                days.push(DayAccumulator {
                    date,
                    min: entry.temp_min,
                    max: entry.temp_max,
                    sum: entry.temperature,
                    count: 1,
                    condition: entry.primary_condition().cloned(),
                });
            },
        }
    }

    days.into_iter()
        .map(|day| {
            #[allow(clippy::cast_precision_loss)]
            let avg = day.sum / day.count as f64;
            DailySummary {
                date: day.date,
                temp_min: round1(day.min),
                temp_avg: round1(avg),
                temp_max: round1(day.max),
                condition: day.condition,
                entry_count: day.count,
            }
        })
        .collect()
}

/// Daily summaries of a snapshot, using the city's own UTC offset
#[must_use]
pub fn summarize(snapshot: &ForecastSnapshot) -> Vec<DailySummary> {
    group_by_day(&snapshot.entries, snapshot.city.utc_offset())
}

/// The raw entries of one local day, in snapshot order
#[must_use]
pub fn entries_for_day(snapshot: &ForecastSnapshot, date: NaiveDate) -> Vec<&ForecastEntry> {
    let offset = snapshot.city.utc_offset();
    snapshot
        .entries
        .iter()
        .filter(|e| e.local_date(offset) == Some(date))
        .collect()
}

/// Cursor over daily summaries that stops at both ends
#[derive(Debug, Clone)]
pub struct DayNavigator {
    days: Vec<DailySummary>,
    position: usize,
}

impl DayNavigator {
    #[must_use]
    pub const fn new(days: Vec<DailySummary>) -> Self {
        Self { days, position: 0 }
    }

    /// The selected day, `None` only when there are no days
    #[must_use]
    pub fn current(&self) -> Option<&DailySummary> {
        self.days.get(self.position)
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position + 1 < self.days.len()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Move to the next day; returns false at the last day
    pub fn next_day(&mut self) -> bool {
        if self.has_next() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous day; returns false at the first day
    pub fn previous_day(&mut self) -> bool {
        if self.has_previous() {
            self.position -= 1;
            true
        } else {
            false
        }
    }
}

/// Beaufort-style label for a wind speed in m/s
#[must_use]
pub fn classify_wind_speed(speed: f64) -> &'static str {
    match speed {
        s if s < 1.0 => "Vento calmo",
        s if s < 5.0 => "Vento leve",
        s if s < 11.0 => "Vento moderado",
        s if s < 19.0 => "Vento forte",
        s if s < 28.0 => "Vento muito forte",
        s if s < 38.0 => "Vento violento",
        _ => "Tempestade",
    }
}

/// Large icon URL for a provider icon code
#[must_use]
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@4x.png")
}

const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

const fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        _ => "dezembro",
    }
}

/// Short Brazilian date, e.g. `15/01/2024`
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Long Brazilian date, e.g. `segunda-feira, 15 de janeiro`
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month())
    )
}

/// Narration for a day summary
#[must_use]
pub fn narrate_day(city_name: &str, day: &DailySummary) -> String {
    let description = day
        .condition
        .as_ref()
        .map_or("", |c| c.description.as_str());
    format!(
        "Previsão para {}. Cidade: {city_name}. Temperatura média de {} graus. \
         Mínima de {} graus. Máxima de {} graus. Condição de tempo: {description}.",
        format_short_date(day.date),
        day.temp_avg,
        day.temp_min,
        day.temp_max,
    )
}

/// Narration for a single 3-hour entry, local to `offset`
#[must_use]
pub fn narrate_entry(entry: &ForecastEntry, offset: FixedOffset) -> String {
    let mut parts = Vec::with_capacity(9);

    if let Some(local) = entry.time().map(|t| t.with_timezone(&offset)) {
        parts.push(format!("Data: {}.", format_long_date(local.date_naive())));
        parts.push(format!("Horário: {}.", local.format("%H:%M")));
    }

    parts.push(format!(
        "Temperatura de {:.1} graus, com mínima de {:.1} e máxima de {:.1} graus.",
        entry.temperature, entry.temp_min, entry.temp_max
    ));
    parts.push(format!("Umidade de {} por cento.", entry.humidity));
    parts.push(format!("{}.", classify_wind_speed(entry.wind_speed)));

    if let Some(rain) = entry.rain_3h {
        parts.push(format!(
            "Chuva registrada nas últimas 3 horas: {rain:.1} milímetros."
        ));
    }
    if let Some(snow) = entry.snow_3h {
        parts.push(format!(
            "Neve registrada nas últimas 3 horas: {snow:.1} milímetros."
        ));
    }
    if let Some(visibility) = entry.visibility {
        parts.push(format!(
            "Visibilidade de {:.1} quilômetros.",
            f64::from(visibility) / 1000.0
        ));
    }

    parts.push(format!("Condição: {}.", entry.description()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15T00:00:00Z, a Monday
    const DAY_START: i64 = 1_705_276_800;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn entry(timestamp: i64, temp: f64, min: f64, max: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temperature: temp,
            feels_like: temp,
            temp_min: min,
            temp_max: max,
            pressure: 1012,
            humidity: 70,
            wind_speed: 3.2,
            wind_direction: 90,
            wind_gust: None,
            cloud_cover: 20,
            visibility: Some(10_000),
            precipitation_probability: 0.1,
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

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn groups_by_date_with_bounds_and_mean() {
        let entries = vec![
            entry(DAY_START + 3 * 3600, 20.0, 19.0, 21.0, "ceu limpo"),
            entry(DAY_START + 6 * 3600, 24.0, 23.5, 25.25, "nublado"),
            entry(DAY_START + 27 * 3600, 18.0, 17.0, 19.0, "chuva"),
        ];

        let days = group_by_day(&entries, utc());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(15));
        assert!((days[0].temp_min - 19.0).abs() < f64::EPSILON);
        assert!((days[0].temp_avg - 22.0).abs() < f64::EPSILON);
        assert!((days[0].temp_max - 25.3).abs() < 1e-9);
        assert_eq!(days[0].entry_count, 2);
        assert_eq!(days[1].date, date(16));
    }

    #[test]
    fn representative_condition_is_first_entry() {
        let entries = vec![
            entry(DAY_START + 3600, 20.0, 19.0, 21.0, "nublado"),
            entry(DAY_START + 4 * 3600, 20.0, 19.0, 21.0, "chuva"),
            entry(DAY_START + 7 * 3600, 20.0, 19.0, 21.0, "chuva"),
        ];

        let days = group_by_day(&entries, utc());
        assert_eq!(days[0].condition.as_ref().unwrap().description, "nublado");
    }

    #[test]
    fn grouping_uses_city_offset() {
        // 01:00 UTC on the 15th is still the 14th in Brasília
        let entries = vec![
            entry(DAY_START + 3600, 20.0, 19.0, 21.0, "ceu limpo"),
            entry(DAY_START + 4 * 3600, 20.0, 19.0, 21.0, "ceu limpo"),
        ];

        let days = group_by_day(&entries, brt());
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(14));
        assert_eq!(days[1].date, date(15));
    }

    #[test]
    fn average_is_plain_mean_between_bounds() {
        let entries = vec![
            entry(DAY_START + 3600, 10.0, 9.0, 11.0, "ceu limpo"),
            entry(DAY_START + 4 * 3600, 12.0, 12.0, 13.0, "ceu limpo"),
            entry(DAY_START + 7 * 3600, 20.0, 18.0, 20.0, "ceu limpo"),
        ];
        let days = group_by_day(&entries, utc());

        assert!((days[0].temp_avg - 14.0).abs() < f64::EPSILON);
        assert!(days[0].temp_min <= days[0].temp_avg);
        assert!(days[0].temp_avg <= days[0].temp_max);
    }

    #[test]
    fn empty_input_yields_no_days() {
        assert!(group_by_day(&[], utc()).is_empty());
    }

    #[test]
    fn navigation_is_bounded() {
        let entries = vec![
            entry(DAY_START, 20.0, 19.0, 21.0, "a"),
            entry(DAY_START + 86_400, 20.0, 19.0, 21.0, "b"),
        ];
        let mut nav = DayNavigator::new(group_by_day(&entries, utc()));

        assert!(!nav.previous_day());
        assert_eq!(nav.position(), 0);
        assert!(nav.next_day());
        assert!(!nav.next_day());
        assert_eq!(nav.current().unwrap().date, date(16));
        assert!(nav.previous_day());
        assert_eq!(nav.current().unwrap().date, date(15));
    }

    #[test]
    fn navigation_over_nothing() {
        let mut nav = DayNavigator::new(vec![]);
        assert!(nav.current().is_none());
        assert!(!nav.next_day());
        assert!(!nav.previous_day());
    }

    #[test]
    fn wind_classes() {
        assert_eq!(classify_wind_speed(0.5), "Vento calmo");
        assert_eq!(classify_wind_speed(1.0), "Vento leve");
        assert_eq!(classify_wind_speed(10.9), "Vento moderado");
        assert_eq!(classify_wind_speed(18.0), "Vento forte");
        assert_eq!(classify_wind_speed(27.9), "Vento muito forte");
        assert_eq!(classify_wind_speed(37.0), "Vento violento");
        assert_eq!(classify_wind_speed(45.0), "Tempestade");
    }

    #[test]
    fn icon_url_uses_large_variant() {
        assert_eq!(
            icon_url("10d"),
            "https://openweathermap.org/img/wn/10d@4x.png"
        );
    }

    #[test]
    fn day_narration() {
        let day = DailySummary {
            date: date(15),
            temp_min: 19.0,
            temp_avg: 22.5,
            temp_max: 26.1,
            condition: Some(WeatherDescriptor {
                id: 500,
                main: "Rain".to_string(),
                description: "chuva leve".to_string(),
                icon: "10d".to_string(),
            }),
            entry_count: 8,
        };

        let text = narrate_day("Recife", &day);
        assert_eq!(
            text,
            "Previsão para 15/01/2024. Cidade: Recife. Temperatura média de 22.5 graus. \
             Mínima de 19 graus. Máxima de 26.1 graus. Condição de tempo: chuva leve."
        );
    }

    #[test]
    fn entry_narration_includes_optional_volumes() {
        let mut e = entry(DAY_START + 15 * 3600, 22.04, 21.0, 23.0, "chuva forte");
        e.rain_3h = Some(12.345);
        e.wind_speed = 12.0;
        e.visibility = Some(4500);

        let text = narrate_entry(&e, brt());

        assert!(text.starts_with("Data: segunda-feira, 15 de janeiro. Horário: 12:00."));
        assert!(text.contains("Temperatura de 22.0 graus, com mínima de 21.0 e máxima de 23.0 graus."));
        assert!(text.contains("Vento forte."));
        assert!(text.contains("Chuva registrada nas últimas 3 horas: 12.3 milímetros."));
        assert!(!text.contains("Neve"));
        assert!(text.contains("Visibilidade de 4.5 quilômetros."));
        assert!(text.ends_with("Condição: chuva forte."));
    }

    #[test]
    fn entries_for_day_filters_local_date() {
        let snapshot = ForecastSnapshot {
            city: domain::CityInfo {
                id: None,
                name: "Recife".to_string(),
                country: "BR".to_string(),
                coordinates: None,
                utc_offset_secs: -10_800,
                population: None,
                sunrise: None,
                sunset: None,
            },
            entries: vec![
                entry(DAY_START + 3600, 20.0, 19.0, 21.0, "a"),
                entry(DAY_START + 4 * 3600, 20.0, 19.0, 21.0, "b"),
                entry(DAY_START + 7 * 3600, 20.0, 19.0, 21.0, "c"),
            ],
        };

        let day = entries_for_day(&snapshot, date(15));
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].description(), "b");
        assert_eq!(summarize(&snapshot).len(), 2);
    }
}
