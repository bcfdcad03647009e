//! City subscription storage port
//!
//! Per-user, per-city forecast documents. Writes are independent per city
//! and overwrite without version checks: the last writer wins.

use async_trait::async_trait;
use domain::{CityName, CitySubscription, ForecastSnapshot, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for city subscription storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CityStorePort: Send + Sync {
    /// List the cities a user has saved, ordered by name
    ///
    /// An empty list is a valid answer and distinct from a lookup failure.
    async fn list_cities(&self, user_id: &UserId) -> Result<Vec<CityName>, ApplicationError>;

    /// Overwrite the stored document for a city with a new snapshot
    ///
    /// The store assigns the write timestamp.
    async fn save_snapshot(
        &self,
        user_id: &UserId,
        city: &CityName,
        snapshot: &ForecastSnapshot,
    ) -> Result<CitySubscription, ApplicationError>;

    /// Get the stored subscription for a city
    async fn get_subscription(
        &self,
        user_id: &UserId,
        city: &CityName,
    ) -> Result<Option<CitySubscription>, ApplicationError>;

    /// Check if the store is reachable
    async fn is_healthy(&self) -> bool;
}
