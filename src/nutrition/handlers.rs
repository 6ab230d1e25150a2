use axum::{routing::post, Json, Router};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    errors::ApiError,
    nutrition::{
        calculator::{compute_bmr, compute_targets},
        dto::{Macronutrients, ProfileForm, UserProfile},
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetsResponse {
    pub bmr: f64,
    pub calories: i64,
    pub macros: Macronutrients,
    pub water_liters: f64,
}

pub fn nutrition_routes() -> Router<AppState> {
    Router::new().route("/nutrition/targets", post(get_targets))
}

/// POST /nutrition/targets: the numbers the plan prompt would be built from, without a model call.
#[instrument(skip(form))]
pub async fn get_targets(Json(form): Json<ProfileForm>) -> Result<Json<TargetsResponse>, ApiError> {
    let profile = UserProfile::try_from(form).map_err(|e| {
        warn!(error = %e, "invalid profile");
        e
    })?;

    let targets = compute_targets(&profile);
    debug!(calories = targets.calories, "targets computed");

    Ok(Json(TargetsResponse {
        bmr: compute_bmr(&profile),
        calories: targets.rounded_calories(),
        macros: targets.macros,
        water_liters: targets.water_liters,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app() -> Router {
        nutrition_routes().with_state(AppState::fake())
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/nutrition/targets")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn returns_rounded_targets() {
        let res = app()
            .oneshot(post_json(serde_json::json!({
                "age": 25,
                "gender": "male",
                "height": 180,
                "weight": 70,
                "activityLevel": "sedentary",
                "goal": "maintenance",
                "dietPreference": "vegetarian"
            })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // bmr = 88.362 + 937.79 + 863.82 - 141.925 = 1748.047; x1.2 = 2097.6564
        assert_eq!(json["calories"], 2098);
        assert_eq!(json["waterLiters"], 2.5);
        assert_eq!(json["macros"]["protein"], 157);
        assert_eq!(json["macros"]["carbs"], 210);
        assert_eq!(json["macros"]["fats"], 70);
        assert!((json["bmr"].as_f64().unwrap() - 1748.047).abs() < 1e-3);
    }

    #[tokio::test]
    async fn rejects_non_numeric_age() {
        let res = app()
            .oneshot(post_json(serde_json::json!({
                "age": "abc",
                "gender": "female",
                "height": 165,
                "weight": 60,
                "activityLevel": "light",
                "goal": "weight-loss",
                "dietPreference": "eggetarian"
            })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["error"],
            "Please enter valid numbers for age, height, and weight."
        );
    }
}
