//! Client sync
//!
//! The action shared by the foreground and background drivers: post the
//! device's user id to the backend and turn returned alerts into local
//! notifications. Alerts already notified within the dedup window are
//! suppressed, so overlapping drivers do not notify twice.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use domain::{Alert, UserId};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DeviceStatePort, LocalNotification, NotificationPort, WeatherBackendPort};

/// Device storage key holding the user identifier
pub const USER_ID_KEY: &str = "userId";

/// Device storage key holding the last forecast shown
pub const LAST_FORECAST_KEY: &str = "@last_forecast";

/// Title of every severe-weather notification
pub const ALERT_TITLE: &str = "⚠️ Alerta de Tempestade";

/// Screen opened when an alert notification is tapped
pub const ALERT_ROUTE: &str = "Search";

/// Sync behaviour settings
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// How long a scheduled alert suppresses an identical one
    pub dedup_window: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            dedup_window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Result of one sync invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The backend answered
    Completed {
        alerts: usize,
        scheduled: usize,
        suppressed: usize,
    },
    /// The backend or device storage could not be reached; retried next tick
    Failed(String),
}

/// Shared sync action used by both client drivers
pub struct SyncService {
    backend: Arc<dyn WeatherBackendPort>,
    device: Arc<dyn DeviceStatePort>,
    notifier: Arc<dyn NotificationPort>,
    config: SyncConfig,
    /// Dedup key → time the notification was scheduled
    ledger: Mutex<HashMap<String, DateTime<Utc>>>,
    /// Serializes first-run id generation across drivers
    init_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for SyncService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncService")
            .field("config", &self.config)
            .field("ledger_size", &self.ledger.lock().len())
            .finish_non_exhaustive()
    }
}

/// Key identifying an alert for deduplication: city, UTC day and message
fn dedup_key(alert: &Alert, day: NaiveDate) -> String {
    format!("{}|{}|{}", alert.city_name, day, alert.message)
}

/// Build the local notification for an alert
#[must_use]
pub fn notification_for(alert: &Alert) -> LocalNotification {
    LocalNotification {
        title: ALERT_TITLE.to_string(),
        body: format!("{} Cidade: {}.", alert.message, alert.city_name),
        route: ALERT_ROUTE.to_string(),
        city_name: alert.city_name.clone(),
    }
}

impl SyncService {
    /// Create a new sync service
    #[must_use]
    pub fn new(
        backend: Arc<dyn WeatherBackendPort>,
        device: Arc<dyn DeviceStatePort>,
        notifier: Arc<dyn NotificationPort>,
        config: SyncConfig,
    ) -> Self {
        Self {
            backend,
            device,
            notifier,
            config,
            ledger: Mutex::new(HashMap::new()),
            init_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Read the device's user id, generating and persisting one on first run
    ///
    /// A stored value that is not a valid id is replaced.
    pub async fn ensure_user_id(&self) -> Result<UserId, ApplicationError> {
        let _guard = self.init_lock.lock().await;

        if let Some(raw) = self.device.get(USER_ID_KEY).await? {
            match UserId::parse(&raw) {
                Ok(id) => return Ok(id),
                Err(e) => warn!(error = %e, "Stored user id is invalid, regenerating"),
            }
        }

        let id = UserId::generate();
        self.device.set(USER_ID_KEY, id.as_str()).await?;
        info!(user_id = %id, "Generated new user id");
        Ok(id)
    }

    /// Run one sync; failures are logged and reported, never raised
    pub async fn send_request(&self) -> SyncOutcome {
        self.send_request_at(Utc::now()).await
    }

    /// Run one sync as of `now`
    #[instrument(skip(self))]
    pub async fn send_request_at(&self, now: DateTime<Utc>) -> SyncOutcome {
        let user_id = match self.ensure_user_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Could not read user id from device storage");
                return SyncOutcome::Failed(e.to_string());
            },
        };

        let alerts = match self.backend.refresh_and_alert(&user_id).await {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Sync request failed, retrying next tick");
                return SyncOutcome::Failed(e.to_string());
            },
        };

        let total = alerts.len();
        let mut scheduled = 0;
        let mut suppressed = 0;

        for alert in &alerts {
            let key = dedup_key(alert, now.date_naive());
            if !self.try_reserve(&key, now) {
                debug!(city = %alert.city_name, "Alert already notified, skipping");
                suppressed += 1;
                continue;
            }

            match self.notifier.schedule(&notification_for(alert)).await {
                Ok(()) => scheduled += 1,
                Err(e) => {
                    self.release(&key);
                    warn!(city = %alert.city_name, error = %e, "Failed to schedule notification");
                },
            }
        }

        info!(
            user_id = %user_id,
            alerts = total,
            scheduled,
            suppressed,
            "Sync completed"
        );
        SyncOutcome::Completed {
            alerts: total,
            scheduled,
            suppressed,
        }
    }

    /// Claim `key` for `now`; false if it was claimed within the window
    ///
    /// Check and insert happen under one lock so overlapping runs cannot
    /// both claim the same alert.
    fn try_reserve(&self, key: &str, now: DateTime<Utc>) -> bool {
        let window = self.config.dedup_window;
        let mut ledger = self.ledger.lock();
        // An entry stamped in the future (clock moved back) is kept
        ledger.retain(|_, at| {
            now.signed_duration_since(*at)
                .to_std()
                .map_or(true, |elapsed| elapsed < window)
        });
        match ledger.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(now);
                true
            },
        }
    }

    /// Drop a claim whose notification could not be scheduled
    fn release(&self, key: &str) {
        self.ledger.lock().remove(key);
    }
}
