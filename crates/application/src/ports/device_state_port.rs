//! Device key-value storage port
//!
//! Small string values persisted on the client device, such as the user
//! identifier and the last forecast shown.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for local device storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeviceStatePort: Send + Sync {
    /// Read a value, `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError>;
}
