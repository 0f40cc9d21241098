//! Inputs handed to the generation capability, built from the stored profile.

use serde::{Deserialize, Serialize};

use crate::profile::model::{Category, Profile};

/// Category sent to flows when the user chose none.
pub const DEFAULT_CATEGORY: Category = Category::General;

/// Profile with every flow-required field filled.
///
/// Absent marks become 0, absent category becomes "General", absent projects
/// become an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowProfile {
    pub name: String,
    pub age: u8,
    pub location: String,
    pub tenth_marks: f64,
    pub twelfth_marks: f64,
    pub graduation_status: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub projects: Vec<String>,
    pub category: String,
}

impl From<&Profile> for FlowProfile {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            age: profile.age,
            location: profile.location.clone(),
            tenth_marks: profile.tenth_marks.unwrap_or(0.0),
            twelfth_marks: profile.twelfth_marks.unwrap_or(0.0),
            graduation_status: profile.graduation_status.as_str().to_string(),
            skills: profile.skills.clone(),
            languages: profile.languages.clone(),
            projects: profile.projects.clone(),
            category: profile
                .category
                .unwrap_or(DEFAULT_CATEGORY)
                .as_str()
                .to_string(),
        }
    }
}

/// Resume generation takes the profile as held, so absent marks and category
/// can be shown as "N/A" rather than as a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    pub profile: Profile,
    pub target_role: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssessmentType {
    #[default]
    MockInterviewQuestions,
    SkillChallengePrompt,
    CommunicationAnalysis,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::MockInterviewQuestions => "mockInterviewQuestions",
            AssessmentType::SkillChallengePrompt => "skillChallengePrompt",
            AssessmentType::CommunicationAnalysis => "communicationAnalysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInput {
    pub profile: Profile,
    pub assessment_type: AssessmentType,
    pub target_role: Option<String>,
    pub user_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamMapInput {
    pub profile: Profile,
    pub dream_goal: String,
}

/// The profile is attached only when the session's profile is complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub career_title: String,
    pub profile: Option<Profile>,
}

/// Trims optional free text; blank becomes `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::fixtures::asha;

    #[test]
    fn test_flow_profile_fills_domain_defaults() {
        let flow = FlowProfile::from(&asha());
        assert_eq!(flow.tenth_marks, 0.0);
        assert_eq!(flow.twelfth_marks, 78.5);
        assert_eq!(flow.category, "General");
        assert_eq!(flow.graduation_status, "Completed");
    }

    #[test]
    fn test_flow_profile_keeps_present_category() {
        let profile = Profile {
            category: Some(Category::Obc),
            ..asha()
        };
        assert_eq!(FlowProfile::from(&profile).category, "OBC");
    }

    #[test]
    fn test_assessment_type_defaults_to_mock_interview() {
        assert_eq!(AssessmentType::default(), AssessmentType::MockInterviewQuestions);
        let parsed: AssessmentType = serde_json::from_str(r#""communicationAnalysis""#).unwrap();
        assert_eq!(parsed, AssessmentType::CommunicationAnalysis);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Data Analyst ".to_string())), Some("Data Analyst".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
