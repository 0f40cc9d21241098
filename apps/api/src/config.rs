use anyhow::{bail, Context, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 2 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Which `CareerGenerator` serves generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationBackend {
    Template,
    Llm,
}

impl GenerationBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(GenerationBackend::Template),
            "llm" => Ok(GenerationBackend::Llm),
            other => bail!("GENERATION_BACKEND must be 'template' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub generation_backend: GenerationBackend,
    /// Required only for the LLM backend.
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    /// Sessions idle longer than this are swept.
    pub session_idle_ttl_secs: u64,
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let generation_backend = match lookup("GENERATION_BACKEND") {
            Some(value) => GenerationBackend::parse(&value)?,
            None => GenerationBackend::Template,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if generation_backend == GenerationBackend::Llm && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (GENERATION_BACKEND=llm)");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let session_idle_ttl_secs = match lookup("SESSION_IDLE_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_SESSION_IDLE_TTL_SECS,
        };

        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_SESSIONS must be a whole number")?,
            None => DEFAULT_MAX_SESSIONS,
        };
        if max_sessions == 0 {
            bail!("MAX_SESSIONS must be at least 1");
        }

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            generation_backend,
            anthropic_api_key,
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            session_idle_ttl_secs,
            max_sessions,
        })
    }

    /// Config used by router tests: template backend, defaults everywhere.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|_| None).expect("default config is valid")
    }
}
