//! GoTrue Identity Client
//!
//! HTTP client for the hosted identity API (`{url}/auth/v1`). Holds the
//! current session in memory and publishes changes to subscribers.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tokio::sync::{broadcast, RwLock};

use super::{AuthError, AuthResult, IdentityProvider, RedirectTokens, EVENT_CHANNEL_CAPACITY};
use crate::config::StoreConfig;
use crate::model::{AuthEvent, Session, User};

/// Identity provider backed by the hosted auth API
pub struct RestIdentityProvider {
    client: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl RestIdentityProvider {
    /// The auth API shares the project URL and anon key with the store
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &StoreConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            base_url: format!("{}/auth/v1", config.base_url()),
            anon_key: config.anon_key.clone(),
            session: RwLock::new(None),
            events,
        }
    }

    /// Build a session from an access token by asking the provider who it
    /// belongs to. Publishes `SignedIn` on success.
    pub async fn restore(&self, tokens: RedirectTokens) -> AuthResult<Session> {
        let user = self.fetch_user(&tokens.access_token).await?;

        let session = Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_in.and_then(expiry_after),
            user,
        };

        *self.session.write().await = Some(session.clone());
        tracing::info!(user_id = %session.user.id, "Session restored");
        self.publish(AuthEvent::SignedIn(session.clone()));

        Ok(session)
    }

    /// Current access token, if signed in
    pub async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    async fn fetch_user(&self, access_token: &str) -> AuthResult<User> {
        let request = self
            .client
            .get(format!("{}/user", self.base_url))
            .bearer_auth(access_token);

        Ok(self.send(request).await?.json().await?)
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<Session> {
        let request = self
            .client
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", "refresh_token")])
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        let token: TokenResponse = self.send(request).await?.json().await?;
        let session = token.into_session();

        *self.session.write().await = Some(session.clone());
        tracing::debug!(user_id = %session.user.id, "Session refreshed");
        self.publish(AuthEvent::TokenRefreshed(session.clone()));

        Ok(session)
    }

    async fn send(&self, request: RequestBuilder) -> AuthResult<Response> {
        let response = request
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(AuthError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AuthError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    fn publish(&self, event: AuthEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn get_session(&self) -> AuthResult<Option<Session>> {
        let current = self.session.read().await.clone();

        match current {
            Some(session) if session.is_expired() => match session.refresh_token.as_deref() {
                Some(refresh_token) => self.refresh(refresh_token).await.map(Some),
                None => {
                    *self.session.write().await = None;
                    self.publish(AuthEvent::SignedOut);
                    Ok(None)
                }
            },
            other => Ok(other),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> AuthResult<String> {
        Ok(format!(
            "{}/authorize?provider={}&redirect_to={}",
            self.base_url,
            urlencoding::encode(provider),
            urlencoding::encode(redirect_to)
        ))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let session = self.session.write().await.take();

        let result = match session {
            Some(session) => {
                let request = self
                    .client
                    .post(format!("{}/logout", self.base_url))
                    .bearer_auth(&session.access_token);
                self.send(request).await.map(|_| ())
            }
            None => Ok(()),
        };

        // The local session is gone either way
        self.publish(AuthEvent::SignedOut);
        result
    }
}

/// Expiry `secs` from now; out-of-range lifetimes count as no expiry
fn expiry_after(secs: i64) -> Option<DateTime<Utc>> {
    Utc::now().checked_add_signed(Duration::try_seconds(secs)?)
}

/// Token grant response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.and_then(expiry_after),
            user: self.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> RestIdentityProvider {
        RestIdentityProvider::new(&StoreConfig {
            url: "https://demo.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            table: "meals".to_string(),
        })
    }

    #[test]
    fn test_authorize_url() {
        let url = provider()
            .sign_in_with_oauth("google", "http://localhost:3000")
            .unwrap();
        assert_eq!(
            url,
            "https://demo.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000"
        );
    }

    #[test]
    fn test_expiry_after() {
        let expiry = expiry_after(3600).unwrap();
        assert!(expiry > Utc::now() + Duration::seconds(3500));
        assert!(expiry_after(i64::MAX).is_none());
        assert!(expiry_after(i64::MIN).is_none());
    }

    #[tokio::test]
    async fn test_no_session_initially() {
        let provider = provider();
        assert!(provider.get_session().await.unwrap().is_none());
        assert!(provider.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_publishes() {
        let provider = provider();
        let mut rx = provider.subscribe();

        provider.sign_out().await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), AuthEvent::SignedOut);
    }
}
