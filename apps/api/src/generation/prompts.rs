// All LLM prompt templates for the generation features.
// Reuses cross-cutting fragments from llm_client::prompts.
// Templates use `{placeholder}` markers filled by the render_* functions below.

use crate::generation::inputs::{
    ConfidenceInput, DreamMapInput, FlowProfile, ResumeInput, SimulationInput,
};
use crate::generation::outputs::MAX_MATCHED_OPPORTUNITIES;
use crate::llm_client::prompts::INDIA_CONTEXT_INSTRUCTION;
use crate::profile::model::Profile;

const NOT_AVAILABLE: &str = "N/A";

// ────────────────────────────────────────────────────────────────────────────
// Career plan / mentor panel / schemes: take the default-filled profile
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {india_context}, {profile}
pub const CAREER_PLAN_PROMPT_TEMPLATE: &str = r#"You are an AI career coach. Based on the user's profile, provide a personalised daily learning plan, a short quiz, and career suggestions.

{india_context}

USER PROFILE:
{profile}

Return a JSON object with this EXACT schema:
{
  "dailyPlan": "what to study and practise today, hour by hour",
  "quiz": "3-5 numbered questions on the skills in the plan",
  "careerSuggestions": ["role or path", "..."]
}"#;

/// Replace: {india_context}, {profile}
pub const MENTOR_PROMPT_TEMPLATE: &str = r#"You are an AI Mentor Panel giving hyper-local career advice in the user's own language.

{india_context}

USER PROFILE:
{profile}

Suggest hyper-local opportunities (for example MSME openings in their district, or college courses taught in their language with reserved seats for their category). Write the advice in the first language the user lists. Keep it encouraging, clear and actionable.

Return a JSON object with this EXACT schema:
{
  "opportunities": ["specific local opportunity", "..."],
  "advice": "personalised advice paragraph"
}"#;

/// Replace: {india_context}, {profile}
pub const SCHEMES_PROMPT_TEMPLATE: &str = r#"You suggest government schemes, scholarships and courses relevant to the user.

{india_context}

USER PROFILE:
{profile}

Return a JSON object with this EXACT schema:
{
  "schemes": [
    {"name": "", "description": "", "eligibility": "", "benefits": "", "applicationProcess": ""}
  ],
  "scholarships": [
    {"name": "", "description": "", "eligibility": "", "benefits": "", "applicationProcess": ""}
  ],
  "courses": [
    {"name": "", "description": "", "institution": "", "duration": "", "fees": ""}
  ]
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Resume / confidence / dream map: take the profile as held
// ────────────────────────────────────────────────────────────────────────────

/// Replace: {india_context}, {profile}, {target_role}, {max_opportunities}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer for users from diverse backgrounds in India, including non-tech fields.
Write a concise professional resume in Markdown and suggest at most {max_opportunities} relevant opportunities (jobs, internships, government schemes, scholarships or courses), local ones first.

{india_context}

USER PROFILE:
{profile}
Target role: {target_role}

Resume rules:
- Headings: Summary, Education, Skills, Projects, Languages. Bullet points for lists.
- Summary of 2-3 sentences mentioning key skills, location and the target role if one is given.
- Mention marks only when provided. Write "No projects listed" when there are none.

Return a JSON object with this EXACT schema:
{
  "resumeText": "markdown resume",
  "matchedOpportunities": ["opportunity", "..."]
}"#;

/// Replace: {profile}, {target_role}, {assessment_type}, {instructions}, {user_response}
pub const CONFIDENCE_PROMPT_TEMPLATE: &str = r#"You are an AI Interview Coach helping users build confidence for their careers.

USER PROFILE:
{profile}
Target role: {target_role}

Assessment type: {assessment_type}
User response to analyse: {user_response}

INSTRUCTIONS:
{instructions}"#;

pub const MOCK_INTERVIEW_INSTRUCTIONS: &str = r#"Generate 3-5 mock interview questions tailored to the profile and target role. Favour behavioural questions and questions about their skills and projects.
Return a JSON object: {"assessmentResult": ["question", "..."], "followUpPrompt": "Prepare your answers..."}"#;

pub const SKILL_CHALLENGE_INSTRUCTIONS: &str = r#"Write one short scenario that challenges one of the user's key skills and ask how they would approach it.
Return a JSON object: {"assessmentResult": ["the challenge"], "followUpPrompt": "Outline your approach..."}"#;

pub const COMMUNICATION_ANALYSIS_INSTRUCTIONS: &str = r#"Analyse the user response for clarity, confidence and structure. Score it between 0 and 100 and give brief constructive feedback. If no response was provided, give a low score and say there was no input.
Return a JSON object: {"assessmentResult": {"score": 0, "feedback": ""}, "followUpPrompt": "Try another question?"}"#;

/// Replace: {india_context}, {profile}, {dream_goal}
pub const DREAM_MAP_PROMPT_TEMPLATE: &str = r#"You are an AI career strategist. Build a realistic step-by-step roadmap from the user's current position to their dream goal.

{india_context}

USER PROFILE:
{profile}

Dream goal: {dream_goal}

Create 4-6 sequential steps. Each has a number starting at 1, a short title, a description personalised to the user's skills and education, a realistic duration ("3 Months", "1 Year", "Ongoing"), and optionally resources such as portals, exams (UPSC, JEE) or platforms.

Return a JSON object with this EXACT schema:
{
  "steps": [
    {"step": 1, "title": "", "description": "", "duration": "", "resources": [""]}
  ]
}"#;

/// Replace: {india_context}, {career_title}, {profile}
pub const SIMULATION_PROMPT_TEMPLATE: &str = r#"You design realistic day-in-the-life simulations of careers accessible to users in India.

{india_context}

Career to simulate: {career_title}
{profile}

Write a short scenario description, then 3-4 tasks typical of the role. Each task has a title, a description of the situation, and optionally 2-3 possible actions and an expected outcome. End with a short reflective conclusion.

Return a JSON object with this EXACT schema:
{
  "scenarioTitle": "",
  "scenarioDescription": "",
  "tasks": [
    {"taskTitle": "", "taskDescription": "", "possibleActions": [""], "expectedOutcome": ""}
  ],
  "conclusion": ""
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

pub fn render_career_plan(profile: &FlowProfile) -> String {
    CAREER_PLAN_PROMPT_TEMPLATE
        .replace("{india_context}", INDIA_CONTEXT_INSTRUCTION)
        .replace("{profile}", &flow_profile_block(profile))
}

pub fn render_mentor(profile: &FlowProfile) -> String {
    MENTOR_PROMPT_TEMPLATE
        .replace("{india_context}", INDIA_CONTEXT_INSTRUCTION)
        .replace("{profile}", &flow_profile_block(profile))
}

pub fn render_schemes(profile: &FlowProfile) -> String {
    SCHEMES_PROMPT_TEMPLATE
        .replace("{india_context}", INDIA_CONTEXT_INSTRUCTION)
        .replace("{profile}", &flow_profile_block(profile))
}

pub fn render_resume(input: &ResumeInput) -> String {
    RESUME_PROMPT_TEMPLATE
        .replace("{india_context}", INDIA_CONTEXT_INSTRUCTION)
        .replace("{max_opportunities}", &MAX_MATCHED_OPPORTUNITIES.to_string())
        .replace("{profile}", &profile_block(&input.profile))
        .replace(
            "{target_role}",
            input.target_role.as_deref().unwrap_or(NOT_AVAILABLE),
        )
}

pub fn render_confidence(input: &ConfidenceInput) -> String {
    use crate::generation::inputs::AssessmentType;

    let instructions = match input.assessment_type {
        AssessmentType::MockInterviewQuestions => MOCK_INTERVIEW_INSTRUCTIONS,
        AssessmentType::SkillChallengePrompt => SKILL_CHALLENGE_INSTRUCTIONS,
        AssessmentType::CommunicationAnalysis => COMMUNICATION_ANALYSIS_INSTRUCTIONS,
    };
    CONFIDENCE_PROMPT_TEMPLATE
        .replace("{profile}", &profile_block(&input.profile))
        .replace(
            "{target_role}",
            input.target_role.as_deref().unwrap_or(NOT_AVAILABLE),
        )
        .replace("{assessment_type}", input.assessment_type.as_str())
        .replace("{instructions}", instructions)
        .replace(
            "{user_response}",
            input.user_response.as_deref().unwrap_or(NOT_AVAILABLE),
        )
}

pub fn render_dream_map(input: &DreamMapInput) -> String {
    DREAM_MAP_PROMPT_TEMPLATE
        .replace("{india_context}", INDIA_CONTEXT_INSTRUCTION)
        .replace("{profile}", &profile_block(&input.profile))
        .replace("{dream_goal}", &input.dream_goal)
}

pub fn render_simulation(input: &SimulationInput) -> String {
    let profile = match &input.profile {
        Some(profile) => format!(
            "User context (personalise where relevant):\n- Age: {}\n- Location: {}\n- Skills: {}\n- Languages: {}",
            profile.age,
            profile.location,
            profile.skills.join(", "),
            profile.languages.join(", ")
        ),
        None => String::new(),
    };
    SIMULATION_PROMPT_TEMPLATE
        .replace("{india_context}", INDIA_CONTEXT_INSTRUCTION)
        .replace("{career_title}", &input.career_title)
        .replace("{profile}", &profile)
}

fn flow_profile_block(profile: &FlowProfile) -> String {
    [
        format!("- Name: {}", profile.name),
        format!("- Age: {}", profile.age),
        format!("- Location: {}", profile.location),
        format!("- 10th Marks (%): {}", profile.tenth_marks),
        format!("- 12th Marks (%): {}", profile.twelfth_marks),
        format!("- Graduation Status: {}", profile.graduation_status),
        format!("- Skills: {}", profile.skills.join(", ")),
        format!("- Languages: {}", profile.languages.join(", ")),
        format!("- Projects: {}", joined_or_na(&profile.projects)),
        format!("- Category: {}", profile.category),
    ]
    .join("\n")
}

/// Absent optional values are shown as "N/A" rather than defaulted.
fn profile_block(profile: &Profile) -> String {
    let marks = |m: Option<f64>| {
        m.map(|v| v.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    [
        format!("- Name: {}", profile.name),
        format!("- Age: {}", profile.age),
        format!("- Location: {}", profile.location),
        format!("- 10th Marks (%): {}", marks(profile.tenth_marks)),
        format!("- 12th Marks (%): {}", marks(profile.twelfth_marks)),
        format!("- Graduation Status: {}", profile.graduation_status),
        format!("- Skills: {}", profile.skills.join(", ")),
        format!("- Languages: {}", profile.languages.join(", ")),
        format!("- Projects: {}", joined_or_na(&profile.projects)),
        format!(
            "- Category: {}",
            profile.category.map(|c| c.as_str()).unwrap_or(NOT_AVAILABLE)
        ),
    ]
    .join("\n")
}

fn joined_or_na(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join("; ")
    }
}
