//! User identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Longest identifier accepted from a client
const MAX_LEN: usize = 128;

/// An opaque, client-generated user identifier
///
/// Devices generate a UUID v4 on first launch, but the server treats the
/// value as an opaque string and only rejects blank or oversized input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh identifier for a new device
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a user ID from client input
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::InvalidUserId(
                "userId must not be empty".to_string(),
            ));
        }
        if s.len() > MAX_LEN {
            return Err(DomainError::InvalidUserId(format!(
                "userId must be at most {MAX_LEN} characters"
            )));
        }
        if s.contains('/') {
            return Err(DomainError::InvalidUserId(
                "userId must not contain '/'".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}
