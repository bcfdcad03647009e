//! SQLite city subscription store
//!
//! Implements [`CityStorePort`] with one JSON forecast document per
//! (user, city) row. Saving overwrites the row unconditionally, so
//! concurrent writers resolve as last writer wins.

use std::sync::Arc;

use application::{error::ApplicationError, ports::CityStorePort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CityName, CitySubscription, ForecastSnapshot, UserId};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument, warn};

use super::connection::{ConnectionPool, DatabaseError, with_connection};

/// SQLite-based city subscription store
#[derive(Debug, Clone)]
pub struct SqliteCityStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCityStore {
    /// Create a new SQLite city store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Corrupt(format!("updated_at '{raw}': {e}")))
}

#[async_trait]
impl CityStorePort for SqliteCityStore {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_cities(&self, user_id: &UserId) -> Result<Vec<CityName>, ApplicationError> {
        let user = user_id.as_str().to_string();

        let names = with_connection(&self.pool, move |conn| {
            let mut stmt = conn.prepare(
                "SELECT city_name FROM city_subscriptions
                 WHERE user_id = ?1 ORDER BY city_name ASC",
            )?;
            let rows = stmt
                .query_map([&user], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await?;

        // Rows with an unusable name are skipped rather than failing the batch
        let cities: Vec<CityName> = names
            .into_iter()
            .filter_map(|name| match CityName::parse(&name) {
                Ok(city) => Some(city),
                Err(e) => {
                    warn!(city = %name, error = %e, "Skipping stored city with invalid name");
                    None
                },
            })
            .collect();

        debug!(count = cities.len(), "Listed cities");
        Ok(cities)
    }

    #[instrument(skip(self, snapshot), fields(user_id = %user_id, city = %city))]
    async fn save_snapshot(
        &self,
        user_id: &UserId,
        city: &CityName,
        snapshot: &ForecastSnapshot,
    ) -> Result<CitySubscription, ApplicationError> {
        let subscription = CitySubscription::new(user_id.clone(), city.clone(), snapshot.clone());
        let json = serde_json::to_string(snapshot)
            .map_err(|e| ApplicationError::Internal(format!("Failed to encode snapshot: {e}")))?;
        let user = user_id.as_str().to_string();
        let city_name = city.as_str().to_string();
        let updated_at = subscription.updated_at().to_rfc3339();

        with_connection(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO city_subscriptions (user_id, city_name, snapshot_json, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, city_name) DO UPDATE SET
                    snapshot_json = excluded.snapshot_json,
                    updated_at = excluded.updated_at",
                params![user, city_name, json, updated_at],
            )?;
            Ok(())
        })
        .await?;

        debug!(entries = snapshot.len(), "Saved forecast snapshot");
        Ok(subscription)
    }

    #[instrument(skip(self), fields(user_id = %user_id, city = %city))]
    async fn get_subscription(
        &self,
        user_id: &UserId,
        city: &CityName,
    ) -> Result<Option<CitySubscription>, ApplicationError> {
        let user = user_id.as_str().to_string();
        let city_name = city.as_str().to_string();

        let row = with_connection(&self.pool, move |conn| {
            Ok(conn
                .query_row(
                    "SELECT snapshot_json, updated_at FROM city_subscriptions
                     WHERE user_id = ?1 AND city_name = ?2",
                    params![user, city_name],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
                )
                .optional()?)
        })
        .await?;

        let Some((json, updated_at)) = row else {
            return Ok(None);
        };

        let snapshot: ForecastSnapshot = serde_json::from_str(&json)
            .map_err(|e| DatabaseError::Corrupt(format!("snapshot for {city}: {e}")))?;
        let updated_at = parse_timestamp(&updated_at)?;

        Ok(Some(CitySubscription::restore(
            user_id.clone(),
            city.clone(),
            snapshot,
            updated_at,
        )))
    }

    async fn is_healthy(&self) -> bool {
        with_connection(&self.pool, |conn| {
            Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))?)
        })
        .await
        .is_ok()
    }
}
