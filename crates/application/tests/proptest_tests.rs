//! Property-based tests for forecast aggregation and hazard detection

use std::collections::HashSet;

use application::{SevereWeatherDetector, group_by_day};
use chrono::{FixedOffset, NaiveDate};
use domain::{CityInfo, ForecastEntry, ForecastSnapshot, WeatherDescriptor};
use proptest::prelude::*;

// 2024-01-01T00:00:00Z
const BASE: i64 = 1_704_067_200;

fn entry(timestamp: i64, temp: f64, spread_low: f64, spread_high: f64, desc: &str) -> ForecastEntry {
    ForecastEntry {
        timestamp,
        temperature: temp,
        feels_like: temp,
        temp_min: temp - spread_low,
        temp_max: temp + spread_high,
        pressure: 1013,
        humidity: 60,
        wind_speed: 2.0,
        wind_direction: 0,
        wind_gust: None,
        cloud_cover: 0,
        visibility: Some(10_000),
        precipitation_probability: 0.0,
        rain_3h: None,
        snow_3h: None,
        conditions: vec![WeatherDescriptor {
            id: 800,
            main: "Clear".to_string(),
            description: desc.to_string(),
            icon: "01d".to_string(),
        }],
    }
}

fn arb_entry() -> impl Strategy<Value = ForecastEntry> {
    (
        0i64..(10 * 86_400),
        -40.0f64..50.0,
        0.0f64..5.0,
        0.0f64..5.0,
    )
        .prop_map(|(offset, temp, lo, hi)| entry(BASE + offset, temp, lo, hi, "ceu limpo"))
}

fn arb_offset() -> impl Strategy<Value = FixedOffset> {
    (-12i32..=14).prop_map(|h| FixedOffset::east_opt(h * 3600).unwrap())
}

// ============================================================================
// Day grouping Property Tests
// ============================================================================

mod day_grouping_tests {
    use super::*;

    proptest! {
        #[test]
        fn one_summary_per_distinct_date(
            entries in prop::collection::vec(arb_entry(), 1..60),
            offset in arb_offset(),
        ) {
            let days = group_by_day(&entries, offset);

            let distinct: HashSet<NaiveDate> = entries
                .iter()
                .filter_map(|e| e.local_date(offset))
                .collect();
            prop_assert_eq!(days.len(), distinct.len());

            let produced: HashSet<NaiveDate> = days.iter().map(|d| d.date).collect();
            prop_assert_eq!(produced, distinct);
        }

        #[test]
        fn min_avg_max_are_ordered(
            entries in prop::collection::vec(arb_entry(), 1..60),
            offset in arb_offset(),
        ) {
            for day in group_by_day(&entries, offset) {
                prop_assert!(day.temp_min <= day.temp_avg, "{:?}", day);
                prop_assert!(day.temp_avg <= day.temp_max, "{:?}", day);
            }
        }

        #[test]
        fn entry_counts_add_up(entries in prop::collection::vec(arb_entry(), 0..60)) {
            let utc = FixedOffset::east_opt(0).unwrap();
            let total: usize = group_by_day(&entries, utc).iter().map(|d| d.entry_count).sum();
            prop_assert_eq!(total, entries.len());
        }
    }
}

// ============================================================================
// Hazard detection Property Tests
// ============================================================================

mod hazard_detection_tests {
    use super::*;

    fn snapshot(entries: Vec<ForecastEntry>) -> ForecastSnapshot {
        ForecastSnapshot {
            city: CityInfo {
                id: None,
                name: "Recife".to_string(),
                country: "BR".to_string(),
                coordinates: None,
                utc_offset_secs: 0,
                population: None,
                sunrise: None,
                sunset: None,
            },
            entries,
        }
    }

    proptest! {
        #[test]
        fn detected_entries_are_same_day_and_hazardous(
            hours in prop::collection::vec(0i64..72, 1..30),
            hazardous in prop::collection::vec(any::<bool>(), 30),
        ) {
            let entries: Vec<ForecastEntry> = hours
                .iter()
                .zip(&hazardous)
                .map(|(h, bad)| {
                    let desc = if *bad { "chuva forte" } else { "nublado" };
                    entry(BASE + h * 3600, 25.0, 1.0, 1.0, desc)
                })
                .collect();
            let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            let detector = SevereWeatherDetector::with_defaults().unwrap();

            let report = detector.scan(&snapshot(entries.clone()), today);

            let expected = entries
                .iter()
                .filter(|e| e.utc_date() == Some(today) && e.description() == "chuva forte")
                .count();
            prop_assert_eq!(report.matches.len(), expected);
            prop_assert_eq!(report.message.is_some(), expected > 0);
        }

        #[test]
        fn mixed_case_descriptions_match(upper in prop::collection::vec(any::<bool>(), 10)) {
            let phrase: String = "tempestade"
                .chars()
                .zip(&upper)
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            let detector = SevereWeatherDetector::with_defaults().unwrap();
            let description = format!("forte {phrase} a tarde");
            prop_assert!(detector.is_hazardous(&description));
        }
    }
}
