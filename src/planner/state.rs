//! View State
//!
//! Everything the page shows, and the pure transitions applied to it once a
//! remote call has answered.

use serde::Serialize;

use crate::model::{parse_calories, AuthEvent, Meal, MealId, NewMeal, User};

/// Page colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Local UI state. Reset on restart; the store stays authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlannerState {
    pub meals: Vec<Meal>,
    /// Meal name input field
    pub meal_name: String,
    /// Calorie input field, as typed
    pub calories: String,
    pub suggestion: Option<String>,
    pub loading: bool,
    pub user: Option<User>,
    pub theme: Theme,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The record the add form would insert, if both fields are usable
    pub fn pending_meal(&self) -> Option<NewMeal> {
        if self.meal_name.is_empty() || self.calories.is_empty() {
            return None;
        }
        let calories = parse_calories(&self.calories)?;
        Some(NewMeal::new(self.meal_name.clone(), calories))
    }

    /// Replace the cache with a fresh fetch
    pub fn replace_meals(&mut self, meals: Vec<Meal>) {
        self.meals = meals;
    }

    /// Append records returned by an insert
    pub fn append_meals(&mut self, meals: Vec<Meal>) {
        self.meals.extend(meals);
    }

    /// Drop the cached entry with `id`; returns whether one was removed
    pub fn remove_meal(&mut self, id: MealId) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != id);
        self.meals.len() != before
    }

    pub fn clear_inputs(&mut self) {
        self.meal_name.clear();
        self.calories.clear();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn begin_suggestion(&mut self) {
        self.loading = true;
    }

    /// Finish a suggestion request; `None` keeps the previous text
    pub fn finish_suggestion(&mut self, suggestion: Option<String>) {
        if suggestion.is_some() {
            self.suggestion = suggestion;
        }
        self.loading = false;
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Mirror a provider notification. Only sign-in and sign-out change the
    /// user; refreshes and profile updates are ignored.
    pub fn apply_auth_event(&mut self, event: &AuthEvent) -> bool {
        match event {
            AuthEvent::SignedIn(session) => {
                self.user = Some(session.user.clone());
                true
            }
            AuthEvent::SignedOut => {
                self.user = None;
                true
            }
            AuthEvent::TokenRefreshed(_) | AuthEvent::UserUpdated(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Session;

    fn meal(id: MealId, name: &str, calories: i32) -> Meal {
        NewMeal::new(name, calories).with_id(id)
    }

    fn session() -> Session {
        Session {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: None,
            user: User {
                id: "u-1".to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn test_pending_meal_requires_both_fields() {
        let mut state = PlannerState::new();
        assert!(state.pending_meal().is_none());

        state.meal_name = "Pasta".to_string();
        assert!(state.pending_meal().is_none());

        state.calories = "700".to_string();
        assert_eq!(state.pending_meal(), Some(NewMeal::new("Pasta", 700)));

        state.meal_name.clear();
        assert!(state.pending_meal().is_none());
    }

    #[test]
    fn test_pending_meal_unparseable_calories() {
        let state = PlannerState {
            meal_name: "Pasta".to_string(),
            calories: "lots".to_string(),
            ..Default::default()
        };
        assert!(state.pending_meal().is_none());
    }

    #[test]
    fn test_remove_meal_only_matching() {
        let mut state = PlannerState::new();
        state.replace_meals(vec![meal(1, "A", 1), meal(2, "B", 2), meal(3, "C", 3)]);

        assert!(state.remove_meal(2));
        assert_eq!(state.meals, vec![meal(1, "A", 1), meal(3, "C", 3)]);
        assert!(!state.remove_meal(2));
    }

    #[test]
    fn test_theme_toggle_twice() {
        let mut state = PlannerState::new();
        let original = state.clone();

        state.toggle_theme();
        assert!(state.theme.is_dark());
        state.toggle_theme();
        assert_eq!(state, original);
    }

    #[test]
    fn test_finish_suggestion_keeps_previous_on_failure() {
        let mut state = PlannerState::new();
        state.begin_suggestion();
        state.finish_suggestion(Some("Salmon bowl".to_string()));

        state.begin_suggestion();
        assert!(state.loading);
        state.finish_suggestion(None);

        assert!(!state.loading);
        assert_eq!(state.suggestion.as_deref(), Some("Salmon bowl"));
    }

    #[test]
    fn test_auth_events() {
        let mut state = PlannerState::new();

        assert!(state.apply_auth_event(&AuthEvent::SignedIn(session())));
        assert!(state.is_signed_in());

        assert!(!state.apply_auth_event(&AuthEvent::TokenRefreshed(session())));
        assert!(state.is_signed_in());

        assert!(state.apply_auth_event(&AuthEvent::SignedOut));
        assert!(!state.is_signed_in());
    }
}
