//! Meal List Component

use leptos::*;

use crate::api;
use crate::state::global::{log_error, meal_line, GlobalState, Meal};

/// "Your Saved Meals" with a delete button per row
#[component]
pub fn MealList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <h2 class="text-xl font-semibold mt-6">"Your Saved Meals"</h2>
        <ul class="mt-4">
            {move || {
                let meals = state.meals.get();
                if meals.is_empty() {
                    view! { <p class="text-gray-500">"No meals saved yet."</p> }.into_view()
                } else {
                    view! {
                        <For
                            each=move || state.meals.get()
                            key=|meal| meal.id
                            children=move |meal| view! { <MealRow meal=meal /> }
                        />
                    }.into_view()
                }
            }}
        </ul>
    }
}

#[component]
fn MealRow(meal: Meal) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let id = meal.id;

    let delete = move |_| {
        let token = state.access_token();
        spawn_local(async move {
            match api::delete_meal(token.as_deref(), id).await {
                Ok(()) => state.remove_meal(id),
                Err(e) => log_error("Error deleting meal", &e),
            }
        });
    };

    view! {
        <li class="bg-white text-black p-2 rounded shadow mt-2 flex justify-between items-center">
            <span>{meal_line(&meal)}</span>
            <button
                on:click=delete
                class="ml-4 bg-red-500 text-white px-2 py-1 rounded hover:bg-red-600"
            >
                "❌"
            </button>
        </li>
    }
}
