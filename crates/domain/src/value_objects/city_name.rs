//! City name value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Longest city name accepted
const MAX_LEN: usize = 100;

/// Name of a city as typed or spoken by the user
///
/// Case-sensitive and never normalized: "São Paulo" and "sao paulo" are two
/// different subscriptions. Resolution of the name is left to the weather API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    /// Parse a city name, rejecting blank or oversized input
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::InvalidCityName(
                "city must not be empty".to_string(),
            ));
        }
        if s.chars().count() > MAX_LEN {
            return Err(DomainError::InvalidCityName(format!(
                "city must be at most {MAX_LEN} characters"
            )));
        }
        if s.contains('/') {
            return Err(DomainError::InvalidCityName(
                "city must not contain '/'".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CityName> for String {
    fn from(name: CityName) -> Self {
        name.0
    }
}
