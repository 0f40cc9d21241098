use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::profile::completeness::CompletenessReport;
use crate::profile::model::{Profile, ProfileUpdate};
use crate::profile::normalize::RawProfileForm;
use crate::profile::validation::{validate_profile, validate_update};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: Option<Profile>,
    pub completeness: CompletenessReport,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileResponse {
    fn load(state: &AppState, id: Uuid) -> Result<Self, AppError> {
        Ok(Self {
            profile: state.sessions.profile(id)?,
            completeness: state.sessions.completeness(id)?,
            updated_at: state.sessions.profile_updated_at(id)?,
        })
    }
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let session = state.sessions.create()?;
    info!(session_id = %session.id, "Session created");
    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id,
            created_at: session.created_at,
        }),
    ))
}

/// DELETE /api/v1/sessions
///
/// Ends the session named by the header, dropping its profile and results.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id)?;
    info!(session_id = %id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(ProfileResponse::load(&state, id)?))
}

/// PUT /api/v1/profile
///
/// Validates the raw form and replaces the held profile. On any field error
/// nothing is stored and every error is returned.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(form): JsonBody<RawProfileForm>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = validate_profile(&form)?;
    state.sessions.replace_profile(id, Some(profile))?;
    info!(session_id = %id, "Profile replaced");

    Ok(Json(ProfileResponse::load(&state, id)?))
}

/// PATCH /api/v1/profile
pub async fn handle_patch_profile(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, AppError> {
    let update = validate_update(update)?;
    state
        .sessions
        .merge_profile(id, update)?
        .ok_or(AppError::MissingProfile)?;
    info!(session_id = %id, "Profile merged");

    Ok(Json(ProfileResponse::load(&state, id)?))
}

/// DELETE /api/v1/profile
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<StatusCode, AppError> {
    state.sessions.replace_profile(id, None)?;
    info!(session_id = %id, "Profile cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile/completeness
pub async fn handle_completeness(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<CompletenessReport>, AppError> {
    Ok(Json(state.sessions.completeness(id)?))
}
