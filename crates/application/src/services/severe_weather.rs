//! Severe-weather detection
//!
//! Scans a forecast's same-day entries for hazard phrases. Matching is a
//! case-insensitive substring search over each condition description,
//! backed by an Aho-Corasick automaton built from the configured phrases.

use aho_corasick::AhoCorasick;
use chrono::NaiveDate;
use domain::{Alert, ForecastEntry, ForecastSnapshot};
use tracing::debug;

use crate::error::ApplicationError;

/// Hazard phrases used when none are configured
///
/// Descriptions come back in Portuguese (`lang=pt_br`): heavy rain,
/// strong winds and storm.
pub const DEFAULT_HAZARD_KEYWORDS: [&str; 3] = ["chuva forte", "ventos fortes", "tempestade"];

/// Result of scanning one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReport {
    /// Matching entries, in snapshot order
    pub matches: Vec<ForecastEntry>,
    /// Message built from the earliest match, `None` if nothing matched
    pub message: Option<String>,
}

impl HazardReport {
    /// Whether any entry matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Detects hazard keywords in forecast descriptions
#[derive(Debug, Clone)]
pub struct SevereWeatherDetector {
    keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl SevereWeatherDetector {
    /// Build a detector from a set of phrases
    ///
    /// Phrases are lower-cased; blank phrases are ignored. An empty set
    /// yields a detector that never matches.
    pub fn new<I, S>(keywords: I) -> Result<Self, ApplicationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let matcher = AhoCorasick::new(&keywords).map_err(|e| {
            ApplicationError::Configuration(format!("Invalid hazard keywords: {e}"))
        })?;

        Ok(Self { keywords, matcher })
    }

    /// Build a detector with [`DEFAULT_HAZARD_KEYWORDS`]
    pub fn with_defaults() -> Result<Self, ApplicationError> {
        Self::new(DEFAULT_HAZARD_KEYWORDS)
    }

    /// The normalized phrases this detector looks for
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether a free-text description contains a hazard phrase
    #[must_use]
    pub fn is_hazardous(&self, description: &str) -> bool {
        self.matcher.is_match(&description.to_lowercase())
    }

    /// The first hazardous description of an entry, if any
    fn matching_description<'a>(&self, entry: &'a ForecastEntry) -> Option<&'a str> {
        entry
            .conditions
            .iter()
            .map(|c| c.description.as_str())
            .find(|d| self.is_hazardous(d))
    }

    /// Scan the entries of `snapshot` that fall on `reference_date` (UTC)
    #[must_use]
    pub fn scan(&self, snapshot: &ForecastSnapshot, reference_date: NaiveDate) -> HazardReport {
        let matches: Vec<ForecastEntry> = snapshot
            .entries_on_utc_date(reference_date)
            .filter(|e| self.matching_description(e).is_some())
            .cloned()
            .collect();

        let message = matches
            .iter()
            .min_by_key(|e| e.timestamp)
            .and_then(|e| self.matching_description(e))
            .map(alert_message);

        debug!(
            city = %snapshot.city.name,
            date = %reference_date,
            matches = matches.len(),
            "Scanned forecast for hazards"
        );

        HazardReport { matches, message }
    }

    /// Build an alert for `city_name`, `None` when nothing matched
    #[must_use]
    pub fn detect(
        &self,
        city_name: &str,
        snapshot: &ForecastSnapshot,
        reference_date: NaiveDate,
    ) -> Option<Alert> {
        let report = self.scan(snapshot, reference_date);
        let message = report.message?;
        Some(Alert {
            city_name: city_name.to_string(),
            message,
            details: report.matches,
        })
    }
}

/// Format the user-facing alert text for a description
#[must_use]
pub fn alert_message(description: &str) -> String {
    format!("Previsão de {description} hoje.")
}
