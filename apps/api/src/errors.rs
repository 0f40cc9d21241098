use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::profile::validation::ValidationErrors;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("No profile has been saved for this session")]
    MissingProfile,

    #[error("Profile is incomplete: missing {0:?}")]
    ProfileIncomplete(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownSession(_) => AppError::NotFound(err.to_string()),
            SessionError::ActionInProgress(_) => AppError::Conflict(err.to_string()),
            SessionError::LimitReached(_) => AppError::Unavailable(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation(errors) => {
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Profile input is invalid",
                        "fields": errors.errors,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MissingProfile => (
                StatusCode::PRECONDITION_FAILED,
                "MISSING_PROFILE",
                self.to_string(),
            ),
            AppError::ProfileIncomplete(missing) => {
                let body = Json(json!({
                    "error": {
                        "code": "PROFILE_INCOMPLETE",
                        "message": "Please complete your profile first",
                        "missingFields": missing,
                    }
                }));
                return (StatusCode::PRECONDITION_FAILED, body).into_response();
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "ACTION_IN_PROGRESS", msg.clone()),
            AppError::Unavailable(msg) => {
                tracing::warn!("Unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SESSION_LIMIT_REACHED",
                    "Too many active sessions, try again later".to_string(),
                )
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "The generation service could not produce a result".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
