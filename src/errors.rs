use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::nutrition::dto::ProfileError;

/// Failures of a single plan request. Display strings are what the caller sees;
/// the wrapped cause of `ExternalService` is for logs only.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Gemini API key not configured. Please add it to .env.local")]
    Configuration,
    #[error("Failed to generate diet plan from AI")]
    ExternalService(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ProfileError),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Plan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_service_hides_cause() {
        let err = ApiError::from(PlanError::ExternalService(anyhow::anyhow!(
            "connection refused to 10.0.0.1"
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to generate diet plan from AI");
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(ProfileError::OutOfRange("weight"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "weight must be a positive number");
    }

    #[test]
    fn configuration_is_server_fault() {
        let err = ApiError::from(PlanError::Configuration);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("not configured"));
    }
}
