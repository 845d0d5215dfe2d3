//! App Root Component
//!
//! Global state, session restore and the page layout.

use leptos::*;

use crate::api;
use crate::components::{AuthButton, MealForm, MealList, Suggestion, ThemeToggle};
use crate::state::global::{log_error, provide_global_state, GlobalState};
use crate::state::session::{self, StoredSession};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // A sign-in redirect wins over a stored session
    let restored = match session::take_from_location() {
        Some(fresh) => {
            session::save(&fresh);
            Some(fresh)
        }
        None => session::load(),
    };
    if let Some(restored) = restored {
        load_user(state, restored);
    }

    // Sign-in and sign-out in other tabs
    let _ = window_event_listener(ev::storage, move |ev: web_sys::StorageEvent| {
        if !session::is_session_key(ev.key()) {
            return;
        }
        match ev.new_value().as_deref().and_then(session::from_json) {
            Some(changed) => load_user(state, changed),
            None => {
                state.session.set(None);
                state.user.set(None);
            }
        }
    });

    fetch_meals(state);

    view! {
        <div class=move || {
            if state.dark_mode.get() {
                "bg-gray-900 text-white flex flex-col items-center justify-center min-h-screen p-6"
            } else {
                "bg-gray-100 text-gray-900 flex flex-col items-center justify-center min-h-screen p-6"
            }
        }>
            <h1 class="text-4xl font-bold text-blue-500">"Meal Planner AI 🍽️"</h1>

            <ThemeToggle />
            <AuthButton />

            {move || state.user.get().is_some().then(|| view! {
                <MealForm />
                <MealList />
                <Suggestion />
            })}
        </div>
    }
}

/// Look up the user of a session and make it current
fn load_user(state: GlobalState, stored: StoredSession) {
    let token = stored.access_token.clone();
    state.session.set(Some(stored));

    spawn_local(async move {
        match api::fetch_user(&token).await {
            Ok(user) => state.user.set(Some(user)),
            Err(e) => {
                log_error("Error fetching session", &e);
                session::clear();
                state.session.set(None);
            }
        }
    });
}

/// Load the saved meals once on start
fn fetch_meals(state: GlobalState) {
    let token = state.access_token();

    spawn_local(async move {
        match api::fetch_meals(token.as_deref()).await {
            Ok(meals) => state.meals.set(meals),
            Err(e) => log_error("Error fetching meals", &e),
        }
    });
}
