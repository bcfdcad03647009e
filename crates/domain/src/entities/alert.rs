//! Severe-weather alert
//!
//! Derived from a snapshot at request time and never persisted.

use serde::{Deserialize, Serialize};

use super::ForecastEntry;

/// A severe-weather notice for one city on the current day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// City the alert was raised for
    pub city_name: String,
    /// Human-readable message, serialized as `alert`
    #[serde(rename = "alert")]
    pub message: String,
    /// Same-day entries whose description matched a hazard keyword
    pub details: Vec<ForecastEntry>,
}
