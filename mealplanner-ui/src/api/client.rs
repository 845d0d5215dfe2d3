//! HTTP API Client
//!
//! Functions for the hosted REST and auth endpoints and the meal planner
//! backend.

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::state::global::{Meal, NewMeal, User};

/// Default hosted project URL
pub const DEFAULT_STORE_URL: &str = "http://localhost:54321";

/// Default suggestion endpoint
pub const DEFAULT_SUGGEST_ENDPOINT: &str = "http://localhost:8000/api/generate_meal";

const MEALS_TABLE: &str = "meals";

fn setting(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(key)
        .ok()?
        .filter(|value| !value.is_empty())
}

/// Hosted project URL from local storage or the default
pub fn get_store_url() -> String {
    setting("mealplanner_store_url")
        .unwrap_or_else(|| DEFAULT_STORE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Anonymous key of the hosted project
pub fn get_anon_key() -> String {
    setting("mealplanner_anon_key").unwrap_or_default()
}

pub fn get_suggest_endpoint() -> String {
    setting("mealplanner_suggest_endpoint")
        .unwrap_or_else(|| DEFAULT_SUGGEST_ENDPOINT.to_string())
}

// ============ Request helpers ============

/// Attach the project key and a bearer of the user token (or the key)
fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    let anon_key = get_anon_key();
    let bearer = format!("Bearer {}", token.unwrap_or(&anon_key));
    builder
        .header("apikey", &anon_key)
        .header("Authorization", &bearer)
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(format!("API error {}: {}", status, text))
}

fn meals_url() -> String {
    format!("{}/rest/v1/{}", get_store_url(), MEALS_TABLE)
}

fn auth_url() -> String {
    format!("{}/auth/v1", get_store_url())
}

// ============ Meals ============

/// Fetch all saved meals
pub async fn fetch_meals(token: Option<&str>) -> Result<Vec<Meal>, String> {
    let response = authorize(Request::get(&format!("{}?select=*", meals_url())), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Insert one meal, returning the stored rows
pub async fn insert_meal(token: Option<&str>, meal: &NewMeal) -> Result<Vec<Meal>, String> {
    let response = authorize(Request::post(&meals_url()), token)
        .header("Prefer", "return=representation")
        .json(&[meal])
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Delete a meal by id
pub async fn delete_meal(token: Option<&str>, id: i64) -> Result<(), String> {
    let response = authorize(Request::delete(&format!("{}?id=eq.{}", meals_url(), id)), token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await.map(|_| ())
}

// ============ Auth ============

/// Look up the user of an access token
pub async fn fetch_user(token: &str) -> Result<User, String> {
    let response = authorize(Request::get(&format!("{}/user", auth_url())), Some(token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Revoke the session on the identity provider
pub async fn sign_out(token: &str) -> Result<(), String> {
    let response = authorize(Request::post(&format!("{}/logout", auth_url())), Some(token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await.map(|_| ())
}

/// URL the browser opens to sign in
pub fn authorize_url(provider: &str, redirect_to: &str) -> String {
    build_authorize_url(&auth_url(), provider, redirect_to)
}

pub fn build_authorize_url(auth_base: &str, provider: &str, redirect_to: &str) -> String {
    format!(
        "{}/authorize?provider={}&redirect_to={}",
        auth_base,
        urlencoding::encode(provider),
        urlencoding::encode(redirect_to)
    )
}

// ============ Suggestions ============

#[derive(Debug, serde::Serialize)]
pub struct GenerateMealRequest {
    pub diet: String,
    pub calories: i32,
}

impl Default for GenerateMealRequest {
    fn default() -> Self {
        Self {
            diet: "balanced".to_string(),
            calories: 600,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct GenerateMealResponse {
    pub meal_suggestion: String,
}

/// Ask the backend for a meal suggestion
pub async fn generate_meal(request: &GenerateMealRequest) -> Result<String, String> {
    let response = Request::post(&get_suggest_endpoint())
        .json(request)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let body: GenerateMealResponse = check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(body.meal_suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_authorize_url() {
        assert_eq!(
            build_authorize_url(
                "http://localhost:54321/auth/v1",
                "google",
                "http://localhost:3000"
            ),
            "http://localhost:54321/auth/v1/authorize?provider=google\
             &redirect_to=http%3A%2F%2Flocalhost%3A3000"
        );
    }

    #[test]
    fn test_default_suggestion_payload() {
        let body = serde_json::to_value(GenerateMealRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({"diet": "balanced", "calories": 600}));
    }
}
