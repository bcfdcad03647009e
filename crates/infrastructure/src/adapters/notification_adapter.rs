//! Notification adapter - Implements NotificationPort without an OS push service
//!
//! Notifications are emitted as `tracing` events and kept in memory so a
//! front end (the CLI) can show them.

use application::error::ApplicationError;
use application::ports::{LocalNotification, NotificationPort};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{info, instrument};

/// Notifier that logs each notification and keeps it until drained
#[derive(Debug, Default)]
pub struct TracingNotifier {
    pending: Mutex<Vec<LocalNotification>>,
}

impl TracingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification delivered since the last call
    pub fn drain(&self) -> Vec<LocalNotification> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Number of notifications waiting to be drained
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }
}

#[async_trait]
impl NotificationPort for TracingNotifier {
    #[instrument(skip(self, notification), fields(city = %notification.city_name))]
    async fn schedule(&self, notification: &LocalNotification) -> Result<(), ApplicationError> {
        info!(
            title = %notification.title,
            body = %notification.body,
            route = %notification.route,
            "Local notification"
        );
        self.pending.lock().push(notification.clone());
        Ok(())
    }
}
