//! Theme Toggle Component

use leptos::*;

use crate::state::global::{theme_label, GlobalState};

/// Switches between the light and dark theme
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <button
            on:click=move |_| state.dark_mode.update(|dark| *dark = !*dark)
            class="mt-4 bg-gray-700 text-white px-4 py-2 rounded-lg hover:bg-gray-600"
        >
            {move || theme_label(state.dark_mode.get())}
        </button>
    }
}
