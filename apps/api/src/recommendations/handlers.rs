//! Axum route handlers for the stateless Recommendations API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::intake::{ClientIntake, EXAMPLE_LOCATION, EXAMPLE_QUERIES};
use crate::recommendations::{find_resources, RecommendationOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub intake: ClientIntake,
    /// Falls back to the configured default when absent.
    pub demo_mode: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub examples: Vec<&'static str>,
    pub location: &'static str,
}

/// POST /api/v1/recommendations
///
/// One-shot submission: validates the intake and returns the outcome.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationOutcome>, AppError> {
    let demo_mode = request.demo_mode.unwrap_or(state.config.demo_mode);
    let outcome = find_resources(&state, &request.intake, demo_mode).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/examples
pub async fn handle_examples() -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: EXAMPLE_QUERIES.to_vec(),
        location: EXAMPLE_LOCATION,
    })
}
