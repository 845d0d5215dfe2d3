//! Planner Controller
//!
//! Connects user actions to remote calls. Each action makes at most one
//! remote call, then applies the response to the shared [`PlannerState`].
//! Failures are logged and leave the state as it was.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::state::PlannerState;
use super::watcher::SessionWatcher;
use crate::auth::IdentityProvider;
use crate::config::AuthConfig;
use crate::model::MealId;
use crate::store::MealStore;
use crate::suggest::{MealSuggester, SuggestionRequest};

/// Headless meal planner: the view model behind every front end
pub struct Planner {
    state: Arc<RwLock<PlannerState>>,
    store: Arc<dyn MealStore>,
    identity: Arc<dyn IdentityProvider>,
    suggester: Arc<dyn MealSuggester>,
    request: SuggestionRequest,
    auth: AuthConfig,
}

impl Planner {
    pub fn new(
        store: Arc<dyn MealStore>,
        identity: Arc<dyn IdentityProvider>,
        suggester: Arc<dyn MealSuggester>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(PlannerState::new())),
            store,
            identity,
            suggester,
            request: SuggestionRequest::default(),
            auth: AuthConfig::default(),
        }
    }

    /// Use a different fixed suggestion payload
    pub fn with_suggestion_request(mut self, request: SuggestionRequest) -> Self {
        self.request = request;
        self
    }

    pub fn with_auth_config(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Shared state, for renderers that hold on to it
    pub fn state(&self) -> Arc<RwLock<PlannerState>> {
        Arc::clone(&self.state)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> PlannerState {
        self.state.read().await.clone()
    }

    /// Initial load: current session, session watcher, meal list.
    ///
    /// The returned watcher keeps the user in sync until it is stopped or
    /// dropped.
    pub async fn start(&self) -> SessionWatcher {
        // Subscribe before reading so a change in between is not lost
        let events = self.identity.subscribe();
        self.load_session().await;
        let watcher = SessionWatcher::spawn(self.state(), Arc::clone(&self.store), events);
        self.fetch_meals().await;
        watcher
    }

    /// Read the provider's current session into the state; the store acts
    /// with the session's token, or anonymously without one
    pub async fn load_session(&self) {
        let session = match self.identity.get_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching session");
                None
            }
        };

        let (token, user) = match session {
            Some(session) => (Some(session.access_token), Some(session.user)),
            None => (None, None),
        };
        self.store.set_access_token(token).await;
        self.state.write().await.set_user(user);
    }

    /// Replace the meal list with the store's contents
    pub async fn fetch_meals(&self) -> bool {
        match self.store.list().await {
            Ok(meals) => {
                tracing::debug!(count = meals.len(), "Loaded meals");
                self.state.write().await.replace_meals(meals);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching meals");
                false
            }
        }
    }

    pub async fn set_meal_name(&self, name: impl Into<String>) {
        self.state.write().await.meal_name = name.into();
    }

    pub async fn set_calories(&self, calories: impl Into<String>) {
        self.state.write().await.calories = calories.into();
    }

    /// Insert the meal described by the input fields.
    ///
    /// Nothing happens unless both fields are filled and the calories parse.
    /// Once the store has been called the inputs are cleared, whatever the
    /// outcome. Returns true when records were appended.
    pub async fn add_meal(&self) -> bool {
        let Some(meal) = self.state.read().await.pending_meal() else {
            return false;
        };

        let result = self.store.insert(vec![meal]).await;

        let mut state = self.state.write().await;
        let added = match result {
            Ok(inserted) => {
                tracing::info!(count = inserted.len(), "Added meal");
                state.append_meals(inserted);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding meal");
                false
            }
        };
        state.clear_inputs();
        added
    }

    /// Delete a meal by id and drop it from the list
    pub async fn delete_meal(&self, id: MealId) -> bool {
        match self.store.delete(id).await {
            Ok(()) => {
                self.state.write().await.remove_meal(id);
                tracing::info!(meal_id = id, "Deleted meal");
                true
            }
            Err(e) => {
                tracing::error!(meal_id = id, error = %e, "Error deleting meal");
                false
            }
        }
    }

    /// Ask the backend for a meal suggestion
    pub async fn generate_meal(&self) -> bool {
        self.state.write().await.begin_suggestion();

        let suggestion = match self.suggester.suggest(&self.request).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!(error = %e, "Error generating meal");
                None
            }
        };

        let generated = suggestion.is_some();
        self.state.write().await.finish_suggestion(suggestion);
        generated
    }

    /// URL to visit for OAuth sign-in with the configured provider
    pub fn sign_in_url(&self) -> Option<String> {
        match self
            .identity
            .sign_in_with_oauth(&self.auth.provider, &self.auth.redirect_to)
        {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!(error = %e, "Error signing in");
                None
            }
        }
    }

    /// Sign out remotely; the local user is cleared regardless
    pub async fn sign_out(&self) {
        if let Err(e) = self.identity.sign_out().await {
            tracing::error!(error = %e, "Error signing out");
        }
        self.store.set_access_token(None).await;
        self.state.write().await.set_user(None);
    }

    pub async fn toggle_theme(&self) {
        self.state.write().await.toggle_theme();
    }
}
