//! Domain Types
//!
//! Records exchanged with the meal store and the identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a meal by the store
pub type MealId = i64;

/// A persisted meal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub calories: i32,
}

/// Insert payload for a meal, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeal {
    pub name: String,
    pub calories: i32,
}

impl NewMeal {
    pub fn new(name: impl Into<String>, calories: i32) -> Self {
        Self {
            name: name.into(),
            calories,
        }
    }

    /// Attach a store-assigned id
    pub fn with_id(self, id: MealId) -> Meal {
        Meal {
            id,
            name: self.name,
            calories: self.calories,
        }
    }
}

/// Parse a calorie field the way a browser `parseInt(s, 10)` would.
///
/// Leading whitespace is skipped and an optional sign is honoured. The longest
/// run of ASCII digits that follows is used; anything after it is ignored.
/// Returns `None` when there is no digit to read or the value overflows.
pub fn parse_calories(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
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

/// An authenticated user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Name to show in the page header
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|at| at <= Utc::now()).unwrap_or(false)
    }
}

/// Session change notifications published by an identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
    UserUpdated(Session),
}

impl AuthEvent {
    /// Event name as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::SignedIn(_) => "SIGNED_IN",
            AuthEvent::SignedOut => "SIGNED_OUT",
            AuthEvent::TokenRefreshed(_) => "TOKEN_REFRESHED",
            AuthEvent::UserUpdated(_) => "USER_UPDATED",
        }
    }

    /// Access token of the session after this event; `None` once signed out
    pub fn access_token(&self) -> Option<&str> {
        match self {
            AuthEvent::SignedIn(session)
            | AuthEvent::TokenRefreshed(session)
            | AuthEvent::UserUpdated(session) => Some(&session.access_token),
            AuthEvent::SignedOut => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calories_plain() {
        assert_eq!(parse_calories("600"), Some(600));
        assert_eq!(parse_calories("  42"), Some(42));
        assert_eq!(parse_calories("-5"), Some(-5));
    }

    #[test]
    fn test_parse_calories_prefix() {
        assert_eq!(parse_calories("350kcal"), Some(350));
        assert_eq!(parse_calories("12.9"), Some(12));
    }

    #[test]
    fn test_parse_calories_rejects() {
        assert_eq!(parse_calories(""), None);
        assert_eq!(parse_calories("kcal"), None);
        assert_eq!(parse_calories("-"), None);
        assert_eq!(parse_calories("99999999999"), None);
    }

    #[test]
    fn test_meal_wire_format() {
        let meal: Meal =
            serde_json::from_str(r#"{"id": 7, "name": "Oatmeal", "calories": 320}"#).unwrap();
        assert_eq!(meal, NewMeal::new("Oatmeal", 320).with_id(7));
    }

    #[test]
    fn test_user_display_name() {
        let user = User {
            id: "abc".to_string(),
            email: None,
        };
        assert_eq!(user.display_name(), "abc");
    }

    #[test]
    fn test_event_access_token() {
        let session = Session {
            access_token: "t-2".to_string(),
            refresh_token: None,
            expires_at: None,
            user: User {
                id: "abc".to_string(),
                email: None,
            },
        };
        assert_eq!(AuthEvent::TokenRefreshed(session).access_token(), Some("t-2"));
        assert_eq!(AuthEvent::SignedOut.access_token(), None);
    }
}
