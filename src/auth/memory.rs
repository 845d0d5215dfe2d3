//! In-process identity provider

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use super::{AuthResult, IdentityProvider, EVENT_CHANNEL_CAPACITY};
use crate::model::{AuthEvent, Session, User};

/// Identity provider that keeps its session in memory. Sign-in happens
/// through [`MemoryIdentityProvider::sign_in`] instead of a browser redirect.
pub struct MemoryIdentityProvider {
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: RwLock::new(None),
            events,
        }
    }
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start signed in as `user`
    pub fn signed_in(user: User) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: RwLock::new(Some(local_session(user))),
            events,
        }
    }

    /// Sign in as `user` and notify subscribers
    pub async fn sign_in(&self, user: User) -> Session {
        let session = local_session(user);
        *self.session.write().await = Some(session.clone());
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
        session
    }

    /// Publish an arbitrary event without touching the session
    pub fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }
}

fn local_session(user: User) -> Session {
    Session {
        access_token: format!("local-{}", uuid::Uuid::new_v4()),
        refresh_token: None,
        expires_at: None,
        user,
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn get_session(&self) -> AuthResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn sign_in_with_oauth(&self, provider: &str, redirect_to: &str) -> AuthResult<String> {
        Ok(format!(
            "{}?provider={}",
            redirect_to.trim_end_matches('/'),
            urlencoding::encode(provider)
        ))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        *self.session.write().await = None;
        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }
}
