//! Meal Suggestion Routes
//!
//! - POST /api/generate_meal - Ask the text-generation backend for a meal

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{GenerateMealRequest, GenerateMealResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// Upper bound for the calorie target
pub const MAX_CALORIES: i32 = 10_000;

/// POST /api/generate_meal
///
/// Generate a meal suggestion for a diet and calorie target.
pub async fn generate_meal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateMealRequest>,
) -> ApiResult<Json<GenerateMealResponse>> {
    validate_generate_request(&req)?;

    let generator = state.generator.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("meal generator not configured".to_string())
    })?;

    let meal_suggestion = generator.generate(&req.diet, req.calories).await?;

    tracing::info!(
        diet = %req.diet,
        calories = req.calories,
        generator = generator.name(),
        "Generated meal suggestion"
    );

    Ok(Json(GenerateMealResponse { meal_suggestion }))
}

/// Validate a generate request
fn validate_generate_request(req: &GenerateMealRequest) -> ApiResult<()> {
    if req.diet.trim().is_empty() {
        return Err(ApiError::Validation("diet cannot be empty".to_string()));
    }

    if req.diet.len() > 100 {
        return Err(ApiError::Validation(
            "diet exceeds maximum length of 100 characters".to_string(),
        ));
    }

    if req.calories <= 0 || req.calories > MAX_CALORIES {
        return Err(ApiError::Validation(format!(
            "calories must be between 1 and {}",
            MAX_CALORIES
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(diet: &str, calories: i32) -> GenerateMealRequest {
        GenerateMealRequest {
            diet: diet.to_string(),
            calories,
        }
    }

    #[test]
    fn test_validate_valid() {
        assert!(validate_generate_request(&request("balanced", 600)).is_ok());
    }

    #[test]
    fn test_validate_empty_diet() {
        assert!(validate_generate_request(&request("  ", 600)).is_err());
    }

    #[test]
    fn test_validate_calorie_bounds() {
        assert!(validate_generate_request(&request("balanced", 0)).is_err());
        assert!(validate_generate_request(&request("balanced", -10)).is_err());
        assert!(validate_generate_request(&request("balanced", MAX_CALORIES + 1)).is_err());
        assert!(validate_generate_request(&request("balanced", MAX_CALORIES)).is_ok());
    }
}
