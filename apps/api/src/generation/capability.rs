//! The generation capability: one async operation per feature.
//!
//! `AppState` holds an `Arc<dyn CareerGenerator>` chosen at startup from
//! config. `TemplateGenerator` is the default and what tests run against;
//! `LlmGenerator` calls the model through `llm_client`.

use async_trait::async_trait;
use thiserror::Error;

use crate::generation::inputs::{
    ConfidenceInput, DreamMapInput, FlowProfile, ResumeInput, SimulationInput,
};
use crate::generation::outputs::{
    ConfidenceAssessment, DreamMap, LearningPlan, MentorAdvice, ResumeDraft, SchemeSuggestions,
    SimulationScenario,
};
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed generation output: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CareerGenerator: Send + Sync {
    /// Short backend name, reported alongside results.
    fn backend(&self) -> &'static str;

    async fn career_plan(&self, input: &FlowProfile) -> Result<LearningPlan, GenerationError>;

    async fn mentor_advice(&self, input: &FlowProfile) -> Result<MentorAdvice, GenerationError>;

    async fn schemes(&self, input: &FlowProfile) -> Result<SchemeSuggestions, GenerationError>;

    async fn resume(&self, input: &ResumeInput) -> Result<ResumeDraft, GenerationError>;

    async fn confidence(
        &self,
        input: &ConfidenceInput,
    ) -> Result<ConfidenceAssessment, GenerationError>;

    async fn dream_map(&self, input: &DreamMapInput) -> Result<DreamMap, GenerationError>;

    async fn simulation(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationScenario, GenerationError>;
}
