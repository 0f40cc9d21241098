//! Model-backed generation through `LlmClient`.
//!
//! Every feature renders its prompt, asks for JSON, and checks the parsed
//! result before handing it back. Checks reject output the UI cannot show.

use async_trait::async_trait;
use tracing::info;

use crate::generation::capability::{CareerGenerator, GenerationError};
use crate::generation::inputs::{
    AssessmentType, ConfidenceInput, DreamMapInput, FlowProfile, ResumeInput, SimulationInput,
};
use crate::generation::outputs::{
    AssessmentResult, ConfidenceAssessment, DreamMap, LearningPlan, MentorAdvice, ResumeDraft,
    SchemeSuggestions, SimulationScenario, MAX_MATCHED_OPPORTUNITIES,
};
use crate::generation::prompts;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

pub struct LlmGenerator {
    client: LlmClient,
}

impl LlmGenerator {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CareerGenerator for LlmGenerator {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn career_plan(&self, input: &FlowProfile) -> Result<LearningPlan, GenerationError> {
        info!(model = %self.client.model(), "Generating career plan");
        let prompt = prompts::render_career_plan(input);
        Ok(self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?)
    }

    async fn mentor_advice(&self, input: &FlowProfile) -> Result<MentorAdvice, GenerationError> {
        info!(model = %self.client.model(), "Generating mentor advice");
        let prompt = prompts::render_mentor(input);
        Ok(self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?)
    }

    async fn schemes(&self, input: &FlowProfile) -> Result<SchemeSuggestions, GenerationError> {
        info!(model = %self.client.model(), "Generating scheme suggestions");
        let prompt = prompts::render_schemes(input);
        Ok(self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?)
    }

    async fn resume(&self, input: &ResumeInput) -> Result<ResumeDraft, GenerationError> {
        info!(model = %self.client.model(), "Generating resume");
        let prompt = prompts::render_resume(input);
        let draft: ResumeDraft = self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        check_resume(draft)
    }

    async fn confidence(
        &self,
        input: &ConfidenceInput,
    ) -> Result<ConfidenceAssessment, GenerationError> {
        info!(
            model = %self.client.model(),
            assessment_type = input.assessment_type.as_str(),
            "Running confidence assessment"
        );
        let prompt = prompts::render_confidence(input);
        let assessment: ConfidenceAssessment =
            self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        check_confidence(input.assessment_type, assessment)
    }

    async fn dream_map(&self, input: &DreamMapInput) -> Result<DreamMap, GenerationError> {
        info!(model = %self.client.model(), "Generating dream map");
        let prompt = prompts::render_dream_map(input);
        let map: DreamMap = self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        check_dream_map(map)
    }

    async fn simulation(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationScenario, GenerationError> {
        info!(
            model = %self.client.model(),
            career = %input.career_title,
            "Generating career simulation"
        );
        let prompt = prompts::render_simulation(input);
        let scenario: SimulationScenario =
            self.client.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        if scenario.tasks.is_empty() {
            return Err(GenerationError::Malformed(
                "simulation has no tasks".to_string(),
            ));
        }
        Ok(scenario)
    }
}

/// Extra opportunities beyond the cap are dropped, not rejected.
fn check_resume(mut draft: ResumeDraft) -> Result<ResumeDraft, GenerationError> {
    if draft.resume_text.trim().is_empty() {
        return Err(GenerationError::Malformed("resume text is empty".to_string()));
    }
    draft.matched_opportunities.truncate(MAX_MATCHED_OPPORTUNITIES);
    Ok(draft)
}

/// Question modes must return prompts and the analysis mode a scored
/// analysis; anything else is malformed.
fn check_confidence(
    assessment_type: AssessmentType,
    assessment: ConfidenceAssessment,
) -> Result<ConfidenceAssessment, GenerationError> {
    match (assessment_type, &assessment.assessment_result) {
        (AssessmentType::CommunicationAnalysis, AssessmentResult::Analysis(analysis)) => {
            if !(0.0..=100.0).contains(&analysis.score) {
                return Err(GenerationError::Malformed(format!(
                    "communication score {} is outside 0-100",
                    analysis.score
                )));
            }
        }
        (AssessmentType::CommunicationAnalysis, AssessmentResult::Prompts(_)) => {
            return Err(GenerationError::Malformed(
                "expected a communication analysis, got prompts".to_string(),
            ));
        }
        (_, AssessmentResult::Analysis(_)) => {
            return Err(GenerationError::Malformed(format!(
                "expected prompts for {}, got an analysis",
                assessment_type.as_str()
            )));
        }
        (_, AssessmentResult::Prompts(prompts)) => {
            if prompts.is_empty() {
                return Err(GenerationError::Malformed(format!(
                    "no prompts returned for {}",
                    assessment_type.as_str()
                )));
            }
        }
    }
    Ok(assessment)
}

fn check_dream_map(map: DreamMap) -> Result<DreamMap, GenerationError> {
    if map.steps.is_empty() {
        return Err(GenerationError::Malformed("dream map has no steps".to_string()));
    }
    Ok(map)
}
