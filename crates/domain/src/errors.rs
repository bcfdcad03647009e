//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// User identifier missing or malformed
    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    /// City name missing or malformed
    #[error("Invalid city name: {0}")]
    InvalidCityName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_user_id_error_message() {
        let err = DomainError::InvalidUserId("must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid user ID: must not be empty");
    }

    #[test]
    fn invalid_city_name_error_message() {
        let err = DomainError::InvalidCityName("must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid city name: must not be empty");
    }
}
