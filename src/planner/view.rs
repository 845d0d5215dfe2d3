//! Text Rendering
//!
//! Renders the page for a terminal, section by section in the same order as
//! the browser view.

use std::fmt::Write;

use super::state::PlannerState;

pub const TITLE: &str = "Meal Planner AI 🍽️";
pub const EMPTY_LIST: &str = "No meals saved yet.";

/// Label of the theme toggle button
pub fn theme_label(state: &PlannerState) -> &'static str {
    if state.theme.is_dark() {
        "☀️ Light Mode"
    } else {
        "🌙 Dark Mode"
    }
}

/// Label of the generate button
pub fn generate_label(state: &PlannerState) -> &'static str {
    if state.loading {
        "Generating..."
    } else {
        "Generate AI Meal Plan"
    }
}

/// One meal list line
pub fn meal_line(name: &str, calories: i32) -> String {
    format!("{} - {} kcal", name, calories)
}

/// Render the whole page
pub fn render(state: &PlannerState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "[{}]", theme_label(state));

    let Some(user) = &state.user else {
        let _ = writeln!(out, "[Sign in with Google]");
        return out;
    };

    let _ = writeln!(out, "[Sign Out] {}", user.display_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "Add a New Meal");
    let _ = writeln!(out, "  Meal Name: {}", state.meal_name);
    let _ = writeln!(out, "  Calories:  {}", state.calories);
    let _ = writeln!(out);
    let _ = writeln!(out, "Your Saved Meals");

    if state.meals.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_LIST);
    } else {
        for meal in &state.meals {
            let _ = writeln!(out, "  #{:<5} {}", meal.id, meal_line(&meal.name, meal.calories));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "[{}]", generate_label(state));
    if state.loading {
        let _ = writeln!(out, "Generating meal...");
    }
    if let Some(suggestion) = &state.suggestion {
        let _ = writeln!(out, "{}", suggestion);
    }

    out
}
