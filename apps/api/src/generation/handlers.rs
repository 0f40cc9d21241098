use std::future::Future;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{JsonBody, OptionalJsonBody};
use crate::generation::capability::GenerationError;
use crate::generation::inputs::{
    non_blank, AssessmentType, ConfidenceInput, DreamMapInput, FlowProfile, ResumeInput,
    SimulationInput,
};
use crate::generation::Feature;
use crate::profile::model::{Profile, ProfileUpdate};
use crate::profile::validation::ValidationErrors;
use crate::session::{SessionId, StoredResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub target_role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceRequest {
    #[serde(default)]
    pub assessment_type: AssessmentType,
    pub target_role: Option<String>,
    pub user_response: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamMapRequest {
    pub dream_goal: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub career_title: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared steps
// ────────────────────────────────────────────────────────────────────────────

/// The held profile when it passes the completeness gate.
///
/// Gated features fail without one; the rest get `None` instead.
fn gated_profile(
    state: &AppState,
    id: Uuid,
    feature: Feature,
) -> Result<Option<Profile>, AppError> {
    if state.sessions.is_complete(id)? {
        return Ok(state.sessions.profile(id)?);
    }
    if !feature.requires_complete_profile() {
        return Ok(None);
    }
    let report = state.sessions.completeness(id)?;
    if !report.has_profile {
        return Err(AppError::MissingProfile);
    }
    Err(AppError::ProfileIncomplete(report.missing_fields))
}

fn require_complete_profile(
    state: &AppState,
    id: Uuid,
    feature: Feature,
) -> Result<Profile, AppError> {
    gated_profile(state, id, feature)?.ok_or(AppError::MissingProfile)
}

fn required_text(value: Option<String>, field: &str, message: &str) -> Result<String, AppError> {
    non_blank(value).ok_or_else(|| {
        let mut errors = ValidationErrors::default();
        errors.push(field, message);
        AppError::Validation(errors)
    })
}

/// Runs one generation call under the session's in-flight guard.
///
/// The feature's previous result is cleared before `work` runs and replaced
/// only on success. No retry on failure.
async fn run_generation<T, F>(
    state: &AppState,
    id: Uuid,
    feature: Feature,
    work: F,
) -> Result<(T, StoredResult), AppError>
where
    T: Serialize,
    F: Future<Output = Result<T, GenerationError>>,
{
    let ticket = state.sessions.begin_action(id, feature)?;
    let backend = state.generator.backend();
    info!(session_id = %id, %feature, backend, "Generation started");

    let output = work.await.map_err(|e| {
        warn!(session_id = %id, %feature, error = %e, "Generation failed");
        AppError::Generation(e.to_string())
    })?;

    let value = serde_json::to_value(&output).map_err(|e| AppError::Internal(e.into()))?;
    let stored = ticket.complete(backend, value);
    info!(session_id = %id, %feature, "Generation succeeded");
    Ok((output, stored))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate/career-plan
pub async fn handle_career_plan(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<StoredResult>, AppError> {
    let profile = require_complete_profile(&state, id, Feature::CareerPlan)?;
    let flow = FlowProfile::from(&profile);
    let (_, stored) = run_generation(
        &state,
        id,
        Feature::CareerPlan,
        state.generator.career_plan(&flow),
    )
    .await?;
    Ok(Json(stored))
}

/// POST /api/v1/generate/mentor-advice
pub async fn handle_mentor_advice(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<StoredResult>, AppError> {
    let profile = require_complete_profile(&state, id, Feature::MentorAdvice)?;
    let flow = FlowProfile::from(&profile);
    let (_, stored) = run_generation(
        &state,
        id,
        Feature::MentorAdvice,
        state.generator.mentor_advice(&flow),
    )
    .await?;
    Ok(Json(stored))
}

/// POST /api/v1/generate/schemes
pub async fn handle_schemes(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<StoredResult>, AppError> {
    let profile = require_complete_profile(&state, id, Feature::Schemes)?;
    let flow = FlowProfile::from(&profile);
    let (_, stored) =
        run_generation(&state, id, Feature::Schemes, state.generator.schemes(&flow)).await?;
    Ok(Json(stored))
}

/// POST /api/v1/generate/resume
///
/// The body is optional; without one no target role is used. A body that
/// is present but does not parse is rejected.
pub async fn handle_resume(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    OptionalJsonBody(request): OptionalJsonBody<ResumeRequest>,
) -> Result<Json<StoredResult>, AppError> {
    let input = ResumeInput {
        profile: require_complete_profile(&state, id, Feature::Resume)?,
        target_role: non_blank(request.target_role),
    };
    let (_, stored) =
        run_generation(&state, id, Feature::Resume, state.generator.resume(&input)).await?;
    Ok(Json(stored))
}

/// POST /api/v1/generate/confidence
///
/// A communication analysis score is written back into the profile's
/// `confidenceScore`.
pub async fn handle_confidence(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    OptionalJsonBody(request): OptionalJsonBody<ConfidenceRequest>,
) -> Result<Json<StoredResult>, AppError> {
    let input = ConfidenceInput {
        profile: require_complete_profile(&state, id, Feature::Confidence)?,
        assessment_type: request.assessment_type,
        target_role: non_blank(request.target_role),
        user_response: non_blank(request.user_response),
    };
    let (assessment, stored) = run_generation(
        &state,
        id,
        Feature::Confidence,
        state.generator.confidence(&input),
    )
    .await?;

    let score = match input.assessment_type {
        AssessmentType::CommunicationAnalysis => assessment.analysis_score(),
        _ => None,
    };
    if let Some(score) = score {
        if state
            .sessions
            .merge_profile(id, ProfileUpdate::confidence_score(score))?
            .is_some()
        {
            info!(session_id = %id, score, "Confidence score updated");
        }
    }
    Ok(Json(stored))
}

/// POST /api/v1/generate/dream-map
pub async fn handle_dream_map(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(request): JsonBody<DreamMapRequest>,
) -> Result<Json<StoredResult>, AppError> {
    let dream_goal = required_text(request.dream_goal, "dreamGoal", "Dream goal is required")?;
    let input = DreamMapInput {
        profile: require_complete_profile(&state, id, Feature::DreamMap)?,
        dream_goal,
    };
    let (_, stored) =
        run_generation(&state, id, Feature::DreamMap, state.generator.dream_map(&input)).await?;
    Ok(Json(stored))
}

/// POST /api/v1/generate/simulation
///
/// Open to sessions without a complete profile; the profile is attached
/// only when it passes the completeness gate.
pub async fn handle_simulation(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(request): JsonBody<SimulationRequest>,
) -> Result<Json<StoredResult>, AppError> {
    let career_title =
        required_text(request.career_title, "careerTitle", "Career title is required")?;
    let input = SimulationInput {
        career_title,
        profile: gated_profile(&state, id, Feature::Simulation)?,
    };
    let (_, stored) = run_generation(
        &state,
        id,
        Feature::Simulation,
        state.generator.simulation(&input),
    )
    .await?;
    Ok(Json(stored))
}

/// GET /api/v1/results/:feature
pub async fn handle_get_result(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Path(feature): Path<Feature>,
) -> Result<Json<StoredResult>, AppError> {
    state
        .sessions
        .result(id, feature)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {feature} result for this session")))
}
