use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::GenerationBackend;
use crate::state::AppState;

/// GET /health
/// Liveness plus the generation backend in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = match state.config.generation_backend {
        GenerationBackend::Llm => Some(state.config.llm_model.as_str()),
        GenerationBackend::Template => None,
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "disha-api",
        "generationBackend": state.generator.backend(),
        "llmModel": model,
        "activeSessions": state.sessions.len(),
    }))
}
