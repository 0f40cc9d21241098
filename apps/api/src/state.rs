use std::sync::Arc;

use crate::config::Config;
use crate::generation::capability::CareerGenerator;
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    /// Template backend by default; `GENERATION_BACKEND=llm` swaps in the model.
    pub generator: Arc<dyn CareerGenerator>,
    pub config: Config,
}
