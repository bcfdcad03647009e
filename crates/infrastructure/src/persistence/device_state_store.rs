//! SQLite device key-value store
//!
//! Backs [`DeviceStatePort`] on the client: the user id and the last
//! forecast shown live here between runs.

use std::sync::Arc;

use application::{error::ApplicationError, ports::DeviceStatePort};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, with_connection};

/// SQLite-based device state
#[derive(Debug, Clone)]
pub struct SqliteDeviceState {
    pool: Arc<ConnectionPool>,
}

impl SqliteDeviceState {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStatePort for SqliteDeviceState {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let key = key.to_string();
        let value = with_connection(&self.pool, move |conn| {
            Ok(conn
                .query_row(
                    "SELECT value FROM device_state WHERE key = ?1",
                    [&key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?)
        })
        .await?;
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        let key = key.to_string();
        let value = value.to_string();
        let updated_at = Utc::now().to_rfc3339();

        with_connection(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO device_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )?;
            Ok(())
        })
        .await?;

        debug!("Stored device value");
        Ok(())
    }
}
