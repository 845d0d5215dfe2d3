//! Meal store error types

use thiserror::Error;

/// Errors returned by a meal store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store could not be reached
    #[error("Store unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl StoreError {
    /// Classify a transport failure
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StoreError::Timeout
        } else if e.is_connect() {
            StoreError::Unavailable
        } else {
            StoreError::Request(e)
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Api {
            status: 401,
            message: "JWT expired".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401: JWT expired");
        assert_eq!(StoreError::Timeout.to_string(), "Request timeout");
    }
}
