//! Global Application State
//!
//! Reactive page state using Leptos signals.

use leptos::*;

use super::session::StoredSession;

/// Page state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Meals from the last successful fetch or mutation
    pub meals: RwSignal<Vec<Meal>>,
    /// Meal name input
    pub meal_name: RwSignal<String>,
    /// Calories input, kept as typed
    pub calories: RwSignal<String>,
    /// Last suggestion text
    pub suggestion: RwSignal<Option<String>>,
    /// A suggestion request is in flight
    pub loading: RwSignal<bool>,
    /// Signed-in user
    pub user: RwSignal<Option<User>>,
    /// Tokens of the signed-in session
    pub session: RwSignal<Option<StoredSession>>,
    /// Dark theme
    pub dark_mode: RwSignal<bool>,
}

/// A saved meal row
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub calories: i32,
}

/// Insert payload for a meal row
#[derive(Clone, Debug, serde::Serialize, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub calories: i32,
}

/// Signed-in user as returned by the identity provider
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        meals: create_rw_signal(Vec::new()),
        meal_name: create_rw_signal(String::new()),
        calories: create_rw_signal(String::new()),
        suggestion: create_rw_signal(None),
        loading: create_rw_signal(false),
        user: create_rw_signal(None),
        session: create_rw_signal(None),
        dark_mode: create_rw_signal(false),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn access_token(&self) -> Option<String> {
        self.session
            .get_untracked()
            .map(|session| session.access_token)
    }

    /// The meal to insert, if both inputs are usable
    pub fn pending_meal(&self) -> Option<NewMeal> {
        pending_meal(&self.meal_name.get_untracked(), &self.calories.get_untracked())
    }

    pub fn clear_inputs(&self) {
        self.meal_name.set(String::new());
        self.calories.set(String::new());
    }

    pub fn append_meals(&self, inserted: Vec<Meal>) {
        self.meals.update(|meals| meals.extend(inserted));
    }

    pub fn remove_meal(&self, id: i64) {
        self.meals.update(|meals| meals.retain(|meal| meal.id != id));
    }
}

/// Build an insert payload from the raw inputs
pub fn pending_meal(name: &str, calories: &str) -> Option<NewMeal> {
    if name.is_empty() || calories.is_empty() {
        return None;
    }
    Some(NewMeal {
        name: name.to_string(),
        calories: parse_calories(calories)?,
    })
}

/// Leading base-10 integer of the text, after leading whitespace
pub fn parse_calories(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i32 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

pub fn theme_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "☀️ Light Mode"
    } else {
        "🌙 Dark Mode"
    }
}

pub fn generate_label(loading: bool) -> &'static str {
    if loading {
        "Generating..."
    } else {
        "Generate AI Meal Plan"
    }
}

pub fn meal_line(meal: &Meal) -> String {
    format!("{} - {} kcal", meal.name, meal.calories)
}

/// Log to the browser console
pub fn log_error(context: &str, error: &str) {
    web_sys::console::error_1(&format!("{}: {}", context, error).into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calories() {
        assert_eq!(parse_calories("600"), Some(600));
        assert_eq!(parse_calories("  450kcal"), Some(450));
        assert_eq!(parse_calories("-20"), Some(-20));
        assert_eq!(parse_calories("kcal"), None);
        assert_eq!(parse_calories(""), None);
        assert_eq!(parse_calories("99999999999"), None);
    }

    #[test]
    fn test_pending_meal_needs_both_fields() {
        assert_eq!(pending_meal("", "300"), None);
        assert_eq!(pending_meal("Toast", ""), None);
        assert_eq!(pending_meal("Toast", "lots"), None);
        assert_eq!(
            pending_meal("Toast", "300"),
            Some(NewMeal {
                name: "Toast".to_string(),
                calories: 300
            })
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(theme_label(false), "🌙 Dark Mode");
        assert_eq!(theme_label(true), "☀️ Light Mode");
        assert_eq!(generate_label(true), "Generating...");
        assert_eq!(generate_label(false), "Generate AI Meal Plan");
    }

    #[test]
    fn test_meal_line() {
        let meal = Meal {
            id: 3,
            name: "Oatmeal".to_string(),
            calories: 320,
        };
        assert_eq!(meal_line(&meal), "Oatmeal - 320 kcal");
    }
}
