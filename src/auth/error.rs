//! Identity provider error types

use thiserror::Error;

/// Errors returned by an identity provider
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity provider unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Redirect URL did not carry session tokens
    #[error("Invalid redirect: {0}")]
    InvalidRedirect(String),

    #[error("Not signed in")]
    NotSignedIn,
}

impl AuthError {
    /// Classify a transport failure
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AuthError::Timeout
        } else if e.is_connect() {
            AuthError::Unavailable
        } else {
            AuthError::Request(e)
        }
    }
}

/// Result type alias for identity operations
pub type AuthResult<T> = Result<T, AuthError>;
