//! Local notification port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A notification to show on the device immediately
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    /// Screen to open when the notification is tapped
    pub route: String,
    /// City to search for when the notification is tapped
    pub city_name: String,
}

/// Port for scheduling local notifications
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Schedule a notification to fire immediately
    async fn schedule(&self, notification: &LocalNotification) -> Result<(), ApplicationError>;
}
