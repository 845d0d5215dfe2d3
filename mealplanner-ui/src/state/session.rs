//! Stored Session
//!
//! The identity provider redirects back with the tokens in the URL fragment.
//! They are kept in local storage so a reload stays signed in.

const SESSION_KEY: &str = "mealplanner_session";

/// Tokens of a signed-in session
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl StoredSession {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }
}

/// Read the tokens out of a redirect fragment such as
/// `#access_token=...&expires_in=3600&refresh_token=...`
pub fn parse_fragment(fragment: &str, now: i64) -> Option<StoredSession> {
    let fragment = fragment.trim_start_matches('#');

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;

    for pair in fragment.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = value.replace('+', " ");
        let Ok(value) = urlencoding::decode(&value) else {
            continue;
        };
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value.into_owned()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<i64>().ok(),
            _ => {}
        }
    }

    Some(StoredSession {
        access_token: access_token?,
        refresh_token,
        // Out-of-range lifetimes count as no expiry
        expires_at: expires_in.and_then(|secs| now.checked_add(secs)),
    })
}

pub fn now_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Take the session out of the current URL fragment, if the page was
/// opened by a sign-in redirect, and drop the fragment from the address bar
pub fn take_from_location() -> Option<StoredSession> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    let session = parse_fragment(&hash, now_seconds())?;

    if let Ok(history) = window.history() {
        let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }

    Some(session)
}

/// Load the stored session, dropping it when expired
pub fn load() -> Option<StoredSession> {
    let raw = storage()?.get_item(SESSION_KEY).ok()??;
    let session = from_json(&raw)?;
    if session.is_expired(now_seconds()) {
        clear();
        return None;
    }
    Some(session)
}

pub fn save(session: &StoredSession) {
    if let (Some(storage), Ok(raw)) = (storage(), serde_json::to_string(session)) {
        let _ = storage.set_item(SESSION_KEY, &raw);
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

/// Whether a storage change concerns the session
pub fn is_session_key(key: Option<String>) -> bool {
    key.as_deref() == Some(SESSION_KEY)
}

/// Parse a stored session, as found in storage events from other tabs
pub fn from_json(raw: &str) -> Option<StoredSession> {
    serde_json::from_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment() {
        let session = parse_fragment(
            "#access_token=abc.def&expires_in=3600&refresh_token=r1&token_type=bearer",
            1_000,
        )
        .unwrap();

        assert_eq!(session.access_token, "abc.def");
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert_eq!(session.expires_at, Some(4_600));
        assert!(!session.is_expired(4_599));
        assert!(session.is_expired(4_600));
    }

    #[test]
    fn test_parse_fragment_decodes_values() {
        let session = parse_fragment("#access_token=a%2Bb%3D&refresh_token=r%201", 0).unwrap();
        assert_eq!(session.access_token, "a+b=");
        assert_eq!(session.refresh_token.as_deref(), Some("r 1"));
    }

    #[test]
    fn test_parse_fragment_with_out_of_range_lifetime() {
        let session =
            parse_fragment("#access_token=t&expires_in=9223372036854775807", 1_000).unwrap();
        assert_eq!(session.expires_at, None);
        assert!(!session.is_expired(i64::MAX));
    }

    #[test]
    fn test_parse_fragment_without_token() {
        assert_eq!(parse_fragment("", 0), None);
        assert_eq!(parse_fragment("#error=access_denied", 0), None);
        assert_eq!(parse_fragment("#access_token=", 0), None);
    }

    #[test]
    fn test_session_without_expiry_never_expires() {
        let session = parse_fragment("access_token=t", 0).unwrap();
        assert_eq!(session.expires_at, None);
        assert!(!session.is_expired(i64::MAX));
    }

    #[test]
    fn test_from_json() {
        let session = from_json(r#"{"access_token":"t","expires_at":10}"#).unwrap();
        assert_eq!(session.access_token, "t");
        assert_eq!(session.refresh_token, None);
        assert!(from_json("not json").is_none());
    }
}
