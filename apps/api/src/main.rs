mod config;
mod errors;
mod extract;
mod generation;
mod jobs;
mod llm_client;
mod profile;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, GenerationBackend};
use crate::generation::capability::CareerGenerator;
use crate::generation::llm::LlmGenerator;
use crate::generation::template::TemplateGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{SessionLimits, SessionRegistry};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; missing or malformed variables abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Disha API v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config)?;
    info!(backend = generator.backend(), "Generation backend initialized");

    let sessions = SessionRegistry::new(SessionLimits::new(
        config.max_sessions,
        config.session_idle_ttl_secs,
    ));
    spawn_session_sweeper(sessions.clone());

    let state = AppState {
        sessions,
        generator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops sessions idle past their TTL.
fn spawn_session_sweeper(sessions: SessionRegistry) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.sweep_expired(chrono::Utc::now());
            if removed > 0 {
                info!(removed, remaining = sessions.len(), "Expired sessions swept");
            }
        }
    });
}

fn build_generator(config: &Config) -> Result<Arc<dyn CareerGenerator>> {
    match config.generation_backend {
        GenerationBackend::Template => Ok(Arc::new(TemplateGenerator)),
        GenerationBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required for the llm backend")?;
            let client = LlmClient::new(api_key, config.llm_model.clone())
                .context("Failed to build LLM HTTP client")?;
            info!(model = %client.model(), "LLM client initialized");
            Ok(Arc::new(LlmGenerator::new(client)))
        }
    }
}
