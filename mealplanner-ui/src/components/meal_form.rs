//! Meal Form Component
//!
//! Name and calorie inputs with the "Add Meal" button.

use leptos::*;

use crate::api;
use crate::state::global::{log_error, GlobalState};

#[component]
pub fn MealForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let add_meal = move |_| {
        let Some(meal) = state.pending_meal() else {
            return;
        };
        let token = state.access_token();

        spawn_local(async move {
            match api::insert_meal(token.as_deref(), &meal).await {
                Ok(inserted) => state.append_meals(inserted),
                Err(e) => log_error("Error adding meal", &e),
            }
            state.clear_inputs();
        });
    };

    view! {
        <div class="flex flex-col items-center mt-6">
            <h2 class="text-xl font-semibold">"Add a New Meal"</h2>
            <input
                type="text"
                placeholder="Meal Name"
                prop:value=move || state.meal_name.get()
                on:input=move |ev| state.meal_name.set(event_target_value(&ev))
                class="mt-2 p-2 border rounded text-black"
            />
            <input
                type="number"
                placeholder="Calories"
                prop:value=move || state.calories.get()
                on:input=move |ev| state.calories.set(event_target_value(&ev))
                class="mt-2 p-2 border rounded text-black"
            />
            <button
                on:click=add_meal
                class="mt-2 bg-blue-500 text-white px-4 py-2 rounded-lg hover:bg-blue-600"
            >
                "Add Meal"
            </button>
        </div>
    }
}
