//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required input is missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The weather API answered with a non-2xx status, or could not be reached
    ///
    /// `status` is `None` when no HTTP response was received.
    #[error("Forecast fetch failed (status {status:?}): {body}")]
    Fetch { status: Option<u16>, body: String },

    /// The document store is unavailable or rejected the operation
    #[error("Store error: {0}")]
    Store(String),

    /// Client-side transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Build a fetch error carrying an upstream status and body
    pub fn fetch(status: u16, body: impl Into<String>) -> Self {
        Self::Fetch {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Whether the error stems from missing or malformed caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }
}
