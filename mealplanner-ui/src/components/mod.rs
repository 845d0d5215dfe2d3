//! UI Components
//!
//! Leptos components for the meal planner page.

pub mod auth_button;
pub mod meal_form;
pub mod meal_list;
pub mod suggestion;
pub mod theme_toggle;

pub use auth_button::AuthButton;
pub use meal_form::MealForm;
pub use meal_list::MealList;
pub use suggestion::Suggestion;
pub use theme_toggle::ThemeToggle;
