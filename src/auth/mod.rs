//! Identity Provider
//!
//! Session retrieval, sign-in/sign-out notifications, OAuth sign-in and
//! sign-out, delegated to an external identity service.
//!
//! Change notifications are published on a `tokio::sync::broadcast` channel;
//! dropping the receiver unsubscribes.

mod error;
mod memory;
mod rest;

pub use error::{AuthError, AuthResult};
pub use memory::MemoryIdentityProvider;
pub use rest::RestIdentityProvider;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::model::{AuthEvent, Session};

/// Capacity of the session-change channel
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// External identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, or `None` when signed out
    async fn get_session(&self) -> AuthResult<Option<Session>>;

    /// Subscribe to session changes
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    /// URL the browser must visit to sign in with `provider`
    fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> AuthResult<String>;

    /// End the current session
    async fn sign_out(&self) -> AuthResult<()>;
}

/// Tokens carried in the fragment of an OAuth redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Extract session tokens from the URL the identity provider redirected to
/// (`...#access_token=...&refresh_token=...&expires_in=3600`).
///
/// Errors reported by the provider (`error_description=...`) are surfaced.
pub fn parse_redirect(url: &str) -> AuthResult<RedirectTokens> {
    let fragment = url
        .split_once('#')
        .map(|(_, f)| f)
        .or_else(|| url.split_once('?').map(|(_, q)| q))
        .unwrap_or(url);

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut error = None;

    for pair in fragment.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(&value.replace('+', " "))
            .map(|v| v.into_owned())
            .map_err(|e| AuthError::InvalidRedirect(e.to_string()))?;

        match key {
            "access_token" if !value.is_empty() => access_token = Some(value),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value),
            "expires_in" => expires_in = value.parse().ok(),
            "error_description" => error = Some(value),
            "error" if error.is_none() => error = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::InvalidRedirect(error));
    }

    let access_token = access_token
        .ok_or_else(|| AuthError::InvalidRedirect("missing access_token".to_string()))?;

    Ok(RedirectTokens {
        access_token,
        refresh_token,
        expires_in,
    })
}
