//! City subscription entity
//!
//! A user's saved city together with the latest forecast fetched for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ForecastSnapshot;
use crate::value_objects::{CityName, UserId};

/// A user's saved city plus its latest snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySubscription {
    user_id: UserId,
    city_name: CityName,
    snapshot: ForecastSnapshot,
    /// Server-assigned time of the last successful write
    updated_at: DateTime<Utc>,
}

impl CitySubscription {
    /// Create a subscription stamped with the current time
    #[must_use]
    pub fn new(user_id: UserId, city_name: CityName, snapshot: ForecastSnapshot) -> Self {
        Self::restore(user_id, city_name, snapshot, Utc::now())
    }

    /// Restore a subscription from storage
    #[must_use]
    pub const fn restore(
        user_id: UserId,
        city_name: CityName,
        snapshot: ForecastSnapshot,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            city_name,
            snapshot,
            updated_at,
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn city_name(&self) -> &CityName {
        &self.city_name
    }

    #[must_use]
    pub const fn snapshot(&self) -> &ForecastSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Consume the subscription, keeping only the snapshot
    #[must_use]
    pub fn into_snapshot(self) -> ForecastSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CityInfo;

    fn snapshot() -> ForecastSnapshot {
        ForecastSnapshot {
            city: CityInfo {
                id: Some(3_390_760),
                name: "Recife".to_string(),
                country: "BR".to_string(),
                coordinates: None,
                utc_offset_secs: -10_800,
                population: None,
                sunrise: None,
                sunset: None,
            },
            entries: vec![],
        }
    }

    #[test]
    fn new_subscription_is_stamped_now() {
        let before = Utc::now();
        let sub = CitySubscription::new(
            UserId::parse("u1").unwrap(),
            CityName::parse("Recife").unwrap(),
            snapshot(),
        );
        assert!(sub.updated_at() >= before);
        assert_eq!(sub.city_name().as_str(), "Recife");
        assert_eq!(sub.user_id().as_str(), "u1");
    }

    #[test]
    fn into_snapshot_returns_payload() {
        let sub = CitySubscription::new(
            UserId::parse("u1").unwrap(),
            CityName::parse("Recife").unwrap(),
            snapshot(),
        );
        assert_eq!(sub.into_snapshot(), snapshot());
    }
}
