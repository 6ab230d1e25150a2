use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    diet::{dto::GeneratePlanResponse, services::request_plan},
    errors::ApiError,
    nutrition::dto::{ProfileForm, UserProfile},
    state::AppState,
};

pub fn diet_routes() -> Router<AppState> {
    Router::new().route("/generate-diet", post(generate_diet))
}

#[instrument(skip(state, form))]
pub async fn generate_diet(
    State(state): State<AppState>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<GeneratePlanResponse>, ApiError> {
    let profile = UserProfile::try_from(form).map_err(|e| {
        warn!(error = %e, "invalid profile");
        e
    })?;

    let plan = request_plan(&state.config.gemini, state.llm.as_ref(), &profile).await?;

    info!(goal = profile.goal.as_str(), "plan served");
    Ok(Json(GeneratePlanResponse {
        diet_plan_html: plan.html,
    }))
}
