//! Session Watcher
//!
//! Background task that mirrors identity-provider notifications into the
//! view state and the store's bearer token.

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

use super::state::PlannerState;
use crate::model::AuthEvent;
use crate::store::MealStore;

/// Handle to a running watcher. Stopping or dropping it unsubscribes.
pub struct SessionWatcher {
    handle: Option<JoinHandle<()>>,
}

impl SessionWatcher {
    /// Spawn a watcher applying events from `events` to `state` and `store`
    pub fn spawn(
        state: Arc<RwLock<PlannerState>>,
        store: Arc<dyn MealStore>,
        mut events: broadcast::Receiver<AuthEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        store
                            .set_access_token(event.access_token().map(str::to_string))
                            .await;
                        let changed = state.write().await.apply_auth_event(&event);
                        if changed {
                            tracing::info!(event = event.name(), "Session changed");
                        } else {
                            tracing::debug!(event = event.name(), "Session event ignored");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session watcher lagged behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("Identity provider closed its event channel");
                        break;
                    }
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Stop listening and wait for the task to wind down
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
