use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::{search_jobs, JobPage, JOB_CATALOG, MAX_LIMIT, PAGE_SIZE};
use crate::session::SessionId;
use crate::state::AppState;

fn parse_limit(raw: Option<&String>) -> Result<usize, AppError> {
    let Some(raw) = raw.map(|r| r.trim()).filter(|r| !r.is_empty()) else {
        return Ok(PAGE_SIZE);
    };
    match raw.parse::<usize>() {
        Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(AppError::BadRequest(format!(
            "limit must be a whole number between 1 and {MAX_LIMIT}"
        ))),
    }
}

/// GET /api/v1/jobs?q=&limit=
///
/// Jobs in the session profile's location are listed first. `limit`
/// defaults to one page; clients load more by raising it.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<JobPage>, AppError> {
    let limit = parse_limit(params.get("limit"))?;
    let term = params.get("q").map(String::as_str).unwrap_or_default();
    let location = state.sessions.profile(id)?.map(|p| p.location);

    let page = search_jobs(JOB_CATALOG, term, location.as_deref(), limit);
    info!(session_id = %id, total = page.total, returned = page.jobs.len(), "Jobs listed");
    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_to_one_page() {
        assert_eq!(parse_limit(None).unwrap(), PAGE_SIZE);
        assert_eq!(parse_limit(Some(&" ".to_string())).unwrap(), PAGE_SIZE);
        assert_eq!(parse_limit(Some(&"12".to_string())).unwrap(), 12);
    }

    #[test]
    fn test_limit_out_of_range_is_rejected() {
        for raw in ["0", "-1", "six", "61"] {
            assert!(
                matches!(parse_limit(Some(&raw.to_string())), Err(AppError::BadRequest(_))),
                "{raw} should be rejected"
            );
        }
    }
}
