//! Structured results returned by every generation backend.
//!
//! These double as the JSON schemas the LLM backend asks the model to fill,
//! so field names match what the prompts describe.

use serde::{Deserialize, Serialize};

/// Upper bound on opportunities attached to a generated resume.
pub const MAX_MATCHED_OPPORTUNITIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    pub daily_plan: String,
    pub quiz: String,
    pub career_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorAdvice {
    pub opportunities: Vec<String>,
    pub advice: String,
}

/// A government scheme or scholarship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeEntry {
    pub name: String,
    pub description: String,
    pub eligibility: String,
    pub benefits: String,
    pub application_process: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    pub name: String,
    pub description: String,
    pub institution: String,
    pub duration: String,
    pub fees: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeSuggestions {
    pub schemes: Vec<SchemeEntry>,
    pub scholarships: Vec<SchemeEntry>,
    pub courses: Vec<CourseEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    pub resume_text: String,
    pub matched_opportunities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationAnalysis {
    pub score: f64,
    pub feedback: String,
}

/// Questions or prompts for the interview and challenge modes, a scored
/// analysis for communication mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssessmentResult {
    Prompts(Vec<String>),
    Analysis(CommunicationAnalysis),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceAssessment {
    pub assessment_result: AssessmentResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_prompt: Option<String>,
}

impl ConfidenceAssessment {
    pub fn analysis_score(&self) -> Option<f64> {
        match &self.assessment_result {
            AssessmentResult::Analysis(analysis) => Some(analysis.score),
            AssessmentResult::Prompts(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamMap {
    pub steps: Vec<RoadmapStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationTask {
    pub task_title: String,
    pub task_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_actions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationScenario {
    pub scenario_title: String,
    pub scenario_description: String,
    pub tasks: Vec<SimulationTask>,
    pub conclusion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_result_accepts_question_list() {
        let json = r#"{"assessmentResult": ["Q1", "Q2"], "followUpPrompt": "Prepare"}"#;
        let parsed: ConfidenceAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.assessment_result,
            AssessmentResult::Prompts(vec!["Q1".to_string(), "Q2".to_string()])
        );
        assert_eq!(parsed.analysis_score(), None);
    }

    #[test]
    fn test_assessment_result_accepts_analysis_object() {
        let json = r#"{"assessmentResult": {"score": 72, "feedback": "Clear"}}"#;
        let parsed: ConfidenceAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.analysis_score(), Some(72.0));
        assert!(parsed.follow_up_prompt.is_none());
    }

    #[test]
    fn test_scheme_entry_uses_camel_case() {
        let json = r#"{
            "name": "PM Kaushal Vikas Yojana",
            "description": "Skill training",
            "eligibility": "Age 15-45",
            "benefits": "Free certification",
            "applicationProcess": "Apply at a training centre"
        }"#;
        let entry: SchemeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.application_process, "Apply at a training centre");
    }

    #[test]
    fn test_roadmap_step_resources_are_optional() {
        let json = r#"{"steps": [{"step": 1, "title": "Start", "description": "d", "duration": "3 Months"}]}"#;
        let map: DreamMap = serde_json::from_str(json).unwrap();
        assert!(map.steps[0].resources.is_none());
        let back = serde_json::to_value(&map).unwrap();
        assert!(back["steps"][0].get("resources").is_none());
    }

    #[test]
    fn test_learning_plan_requires_all_fields() {
        let result: Result<LearningPlan, _> = serde_json::from_str(r#"{"dailyPlan": "x"}"#);
        assert!(result.is_err());
    }
}
