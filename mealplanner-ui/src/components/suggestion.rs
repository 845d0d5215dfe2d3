//! Suggestion Component
//!
//! Generate button, loading line and the last suggestion.

use leptos::*;

use crate::api::{self, GenerateMealRequest};
use crate::state::global::{generate_label, log_error, GlobalState};

#[component]
pub fn Suggestion() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let generate = move |_| {
        state.loading.set(true);
        spawn_local(async move {
            match api::generate_meal(&GenerateMealRequest::default()).await {
                Ok(text) => state.suggestion.set(Some(text)),
                Err(e) => log_error("Error generating meal", &e),
            }
            state.loading.set(false);
        });
    };

    view! {
        <button
            on:click=generate
            class="mt-6 bg-purple-500 text-white px-4 py-2 rounded-lg hover:bg-purple-600"
        >
            {move || generate_label(state.loading.get())}
        </button>

        {move || state.loading.get().then(|| view! {
            <p class="mt-4 text-gray-500 flex items-center space-x-2">
                <span class="inline-block loading-spinner w-4 h-4" />
                <span>"Generating meal..."</span>
            </p>
        })}

        {move || state.suggestion.get().map(|text| view! {
            <p class="mt-4 p-4 bg-white text-black shadow">{text}</p>
        })}
    }
}
