//! Auth Button Component
//!
//! "Sign in with Google" when signed out, "Sign Out" when signed in.

use leptos::*;

use crate::api;
use crate::state::global::{log_error, GlobalState};
use crate::state::session;

const PROVIDER: &str = "google";

#[component]
pub fn AuthButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let sign_in = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let origin = match window.location().origin() {
            Ok(origin) => origin,
            Err(_) => {
                log_error("Error signing in", "no page origin");
                return;
            }
        };

        if let Err(e) = window
            .location()
            .set_href(&api::authorize_url(PROVIDER, &origin))
        {
            log_error("Error signing in", &format!("{:?}", e));
        }
    };

    let sign_out = move |_| {
        let token = state.access_token();

        // Local sign-out happens whether or not the revoke succeeds
        session::clear();
        state.session.set(None);
        state.user.set(None);

        if let Some(token) = token {
            spawn_local(async move {
                if let Err(e) = api::sign_out(&token).await {
                    log_error("Error signing out", &e);
                }
            });
        }
    };

    view! {
        {move || {
            if state.user.get().is_some() {
                view! {
                    <button
                        on:click=sign_out
                        class="mt-4 bg-red-500 text-white px-4 py-2 rounded-lg hover:bg-red-600"
                    >
                        "Sign Out"
                    </button>
                }.into_view()
            } else {
                view! {
                    <button
                        on:click=sign_in
                        class="mt-4 bg-green-500 text-white px-4 py-2 rounded-lg hover:bg-green-600"
                    >
                        "Sign in with Google"
                    </button>
                }.into_view()
            }
        }}
    }
}
