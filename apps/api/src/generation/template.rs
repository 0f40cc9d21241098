//! Deterministic generation backend.
//!
//! Builds every result by interpolating profile fields into fixed text. No
//! network calls, no delays: the same input always yields the same output.

use async_trait::async_trait;

use crate::generation::capability::{CareerGenerator, GenerationError};
use crate::generation::inputs::{
    AssessmentType, ConfidenceInput, DreamMapInput, FlowProfile, ResumeInput, SimulationInput,
};
use crate::generation::outputs::{
    AssessmentResult, CommunicationAnalysis, ConfidenceAssessment, CourseEntry, DreamMap,
    LearningPlan, MentorAdvice, ResumeDraft, RoadmapStep, SchemeEntry, SchemeSuggestions,
    SimulationScenario, SimulationTask, MAX_MATCHED_OPPORTUNITIES,
};
use crate::profile::model::Profile;

/// Score given to a communication analysis with nothing to analyse.
const EMPTY_RESPONSE_SCORE: f64 = 40.0;
const BASE_RESPONSE_SCORE: f64 = 50.0;
const MAX_TEMPLATE_SCORE: f64 = 90.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

#[async_trait]
impl CareerGenerator for TemplateGenerator {
    fn backend(&self) -> &'static str {
        "template"
    }

    async fn career_plan(&self, input: &FlowProfile) -> Result<LearningPlan, GenerationError> {
        let focus = first_or(&input.skills, "a core skill");
        Ok(LearningPlan {
            daily_plan: format!(
                "Morning: 45 minutes practising {focus}. Afternoon: one free online lesson in {}. \
                 Evening: 20 minutes reading job listings around {}.",
                nth_or(&input.skills, 1, "a new skill"),
                input.location
            ),
            quiz: format!(
                "1. Name two ways {focus} is used at work.\n\
                 2. Which of your projects used {focus}?\n\
                 3. What would you learn next after {focus}?"
            ),
            career_suggestions: input
                .skills
                .iter()
                .take(3)
                .map(|skill| format!("Entry-level roles that use {skill} near {}", input.location))
                .collect(),
        })
    }

    async fn mentor_advice(&self, input: &FlowProfile) -> Result<MentorAdvice, GenerationError> {
        let language = first_or(&input.languages, "your language");
        Ok(MentorAdvice {
            opportunities: vec![
                format!("MSME openings in {} for {}", input.location, first_or(&input.skills, "your skills")),
                format!("College courses taught in {language} with {} category seats", input.category),
                format!("District skill centre programmes in {}", input.location),
            ],
            advice: format!(
                "{}, you already bring {} and speak {}. Start with opportunities close to {} \
                 and build one new skill at a time.",
                input.name,
                input.skills.join(", "),
                input.languages.join(", "),
                input.location
            ),
        })
    }

    async fn schemes(&self, input: &FlowProfile) -> Result<SchemeSuggestions, GenerationError> {
        Ok(SchemeSuggestions {
            schemes: vec![SchemeEntry {
                name: "Pradhan Mantri Kaushal Vikas Yojana".to_string(),
                description: "Short-term skill training with industry certification.".to_string(),
                eligibility: format!("Indian nationals aged 15-45; you are {}.", input.age),
                benefits: "Free training, certification and placement support.".to_string(),
                application_process: format!(
                    "Register on the Skill India portal and pick a centre near {}.",
                    input.location
                ),
            }],
            scholarships: vec![SchemeEntry {
                name: format!("{} category scholarships", input.category),
                description: "Central and state scholarships listed on the National Scholarship Portal."
                    .to_string(),
                eligibility: format!(
                    "Depends on category and marks (12th: {}%).",
                    input.twelfth_marks
                ),
                benefits: "Tuition fee support and maintenance allowance.".to_string(),
                application_process: "Apply online on the National Scholarship Portal.".to_string(),
            }],
            courses: input
                .skills
                .iter()
                .take(2)
                .map(|skill| CourseEntry {
                    name: format!("{skill} fundamentals"),
                    description: format!("Self-paced course to strengthen {skill}."),
                    institution: "SWAYAM".to_string(),
                    duration: "8 weeks".to_string(),
                    fees: "Free".to_string(),
                })
                .collect(),
        })
    }

    async fn resume(&self, input: &ResumeInput) -> Result<ResumeDraft, GenerationError> {
        let profile = &input.profile;
        let mut opportunities = vec![
            format!(
                "Suggested Job: Entry-level role related to {} in {}.",
                first_or(&profile.skills, "your skills"),
                profile.location
            ),
            format!(
                "Suggested Scholarship: Check eligibility for {} category scholarships on the National Scholarship Portal.",
                profile.category.map(|c| c.as_str()).unwrap_or("General")
            ),
            format!(
                "Suggested Course: Upskilling course in {}.",
                nth_or(&profile.skills, 1, "a relevant skill")
            ),
        ];
        opportunities.truncate(MAX_MATCHED_OPPORTUNITIES);

        Ok(ResumeDraft {
            resume_text: render_resume(profile, input.target_role.as_deref()),
            matched_opportunities: opportunities,
        })
    }

    async fn confidence(
        &self,
        input: &ConfidenceInput,
    ) -> Result<ConfidenceAssessment, GenerationError> {
        let profile = &input.profile;
        let assessment = match input.assessment_type {
            AssessmentType::MockInterviewQuestions => {
                let experience = profile
                    .projects
                    .first()
                    .map(|p| format!("project '{p}'"))
                    .unwrap_or_else(|| "your experience".to_string());
                ConfidenceAssessment {
                    assessment_result: AssessmentResult::Prompts(vec![
                        format!(
                            "Tell me about yourself and why you're interested in {}?",
                            input.target_role.as_deref().unwrap_or("this field")
                        ),
                        format!(
                            "Describe a challenging situation you faced (based on {experience}) and how you handled it."
                        ),
                        "Where do you see yourself in 5 years?".to_string(),
                        format!(
                            "Why should we consider you? (Highlighting skills: {})",
                            profile.skills.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
                        ),
                    ]),
                    follow_up_prompt: Some(
                        "Prepare your answers for these common interview questions.".to_string(),
                    ),
                }
            }
            AssessmentType::SkillChallengePrompt => ConfidenceAssessment {
                assessment_result: AssessmentResult::Prompts(vec![format!(
                    "Based on your skill '{}', describe how you would handle a real task that depends on it. Give a step-by-step plan.",
                    first_or(&profile.skills, "communication")
                )]),
                follow_up_prompt: Some("Outline your approach to this challenge.".to_string()),
            },
            AssessmentType::CommunicationAnalysis => {
                let analysis = match input.user_response.as_deref() {
                    Some(response) => CommunicationAnalysis {
                        score: response_score(response),
                        feedback: "Your response has a clear structure. Add one concrete example to make it stronger."
                            .to_string(),
                    },
                    None => CommunicationAnalysis {
                        score: EMPTY_RESPONSE_SCORE,
                        feedback: "No response was provided for analysis.".to_string(),
                    },
                };
                ConfidenceAssessment {
                    assessment_result: AssessmentResult::Analysis(analysis),
                    follow_up_prompt: Some(
                        "Would you like to try answering another question for analysis?".to_string(),
                    ),
                }
            }
        };
        Ok(assessment)
    }

    async fn dream_map(&self, input: &DreamMapInput) -> Result<DreamMap, GenerationError> {
        let goal = &input.dream_goal;
        let skills = input.profile.skills.join(", ");
        Ok(DreamMap {
            steps: vec![
                RoadmapStep {
                    step: 1,
                    title: "Foundation & Skill Assessment".to_string(),
                    description: format!(
                        "Identify the foundational skills needed for {goal}. Compare them with what you have today ({skills}) and start on the biggest gap."
                    ),
                    duration: "1-3 Months".to_string(),
                    resources: Some(vec!["SWAYAM".to_string(), "YouTube tutorials".to_string()]),
                },
                RoadmapStep {
                    step: 2,
                    title: "Targeted Learning & Practice".to_string(),
                    description: format!(
                        "Work through the core skills for {goal} and finish one beginner project. Prepare for any entrance exam the path requires."
                    ),
                    duration: "6-12 Months".to_string(),
                    resources: Some(vec!["NPTEL".to_string(), "Mock test series".to_string()]),
                },
                RoadmapStep {
                    step: 3,
                    title: "Experience & Networking".to_string(),
                    description: format!(
                        "Look for internships, volunteer work or entry-level roles related to {goal} around {}. Build a small portfolio.",
                        input.profile.location
                    ),
                    duration: "1-2 Years".to_string(),
                    resources: Some(vec!["Internshala".to_string(), "LinkedIn".to_string()]),
                },
                RoadmapStep {
                    step: 4,
                    title: "Specialization & Growth".to_string(),
                    description: format!(
                        "Pick a niche within {goal}, earn a certification and find a mentor."
                    ),
                    duration: "Ongoing".to_string(),
                    resources: None,
                },
            ],
        })
    }

    async fn simulation(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationScenario, GenerationError> {
        let title = &input.career_title;
        let (first_task, urgent_task) = simulation_tasks(title);
        let greeting = match &input.profile {
            Some(profile) => format!("Welcome, {}!", profile.name),
            None => "Welcome!".to_string(),
        };
        Ok(SimulationScenario {
            scenario_title: format!("A Day as a {title}"),
            scenario_description: format!(
                "{greeting} Today you step into the shoes of a {title}. Let's see how you handle the challenges."
            ),
            tasks: vec![
                SimulationTask {
                    task_title: "Morning Briefing".to_string(),
                    task_description: format!("You receive your first task: {first_task}"),
                    possible_actions: Some(vec![
                        "Review logs and reports".to_string(),
                        "Consult a senior colleague".to_string(),
                        "Start the work immediately".to_string(),
                    ]),
                    expected_outcome: Some(
                        "Prioritise the task based on urgency and the information available."
                            .to_string(),
                    ),
                },
                SimulationTask {
                    task_title: "Mid-day Challenge".to_string(),
                    task_description: format!(
                        "An unexpected problem arises: {urgent_task} Describe how you would handle it while managing your existing work."
                    ),
                    possible_actions: None,
                    expected_outcome: None,
                },
                SimulationTask {
                    task_title: "Collaboration Task".to_string(),
                    task_description: "You need help from another team. Draft a short message outlining the issue and the support you need."
                        .to_string(),
                    possible_actions: None,
                    expected_outcome: None,
                },
            ],
            conclusion: format!(
                "Well done! Reflect on the decisions you made today. What did you learn about being a {title}?"
            ),
        })
    }
}

/// Longer responses score higher, capped below a perfect score.
pub fn response_score(response: &str) -> f64 {
    let length = response.chars().count() as f64;
    (BASE_RESPONSE_SCORE + length / 5.0).min(MAX_TEMPLATE_SCORE)
}

fn simulation_tasks(career_title: &str) -> (&'static str, &'static str) {
    match career_title {
        "Software Developer" => (
            "Debug a critical login issue.",
            "A server deployment failed.",
        ),
        "Civil Servant (Admin)" => (
            "Address a citizen complaint about road maintenance.",
            "An urgent request arrived from a senior official.",
        ),
        _ => (
            "Diagnose a reported outage.",
            "A safety hazard has been reported.",
        ),
    }
}

fn render_resume(profile: &Profile, target_role: Option<&str>) -> String {
    let marks = |m: Option<f64>| m.map(|v| format!("{v}%")).unwrap_or_else(|| "N/A".to_string());
    let bullets = |items: &[String], empty: &str| {
        if items.is_empty() {
            format!("* {empty}")
        } else {
            items
                .iter()
                .map(|item| format!("* {item}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    };
    let mut highlighted = profile.skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if profile.skills.len() > 3 {
        highlighted.push_str("...");
    }
    let objective = match target_role {
        Some(role) => format!("related to {role}"),
        None => "for growth and contribution".to_string(),
    };

    [
        format!("## {}", profile.name),
        format!(
            "**Location:** {} | **Age:** {} | **Category:** {}",
            profile.location,
            profile.age,
            profile.category.map(|c| c.as_str()).unwrap_or("N/A")
        ),
        String::new(),
        "**Summary:**".to_string(),
        format!(
            "A motivated and adaptable individual based in {}. Skilled in {highlighted}. Seeking opportunities {objective}. Fluent in {}.",
            profile.location,
            profile.languages.join(", ")
        ),
        String::new(),
        "**Education:**".to_string(),
        format!("* Graduation Status: {}", profile.graduation_status),
        format!("* 12th Standard Marks: {}", marks(profile.twelfth_marks)),
        format!("* 10th Standard Marks: {}", marks(profile.tenth_marks)),
        String::new(),
        "**Skills:**".to_string(),
        bullets(&profile.skills, "Skill details not provided."),
        String::new(),
        "**Projects:**".to_string(),
        bullets(&profile.projects, "No projects listed."),
        String::new(),
        "**Languages:**".to_string(),
        bullets(&profile.languages, "Language details not provided."),
    ]
    .join("\n")
}

fn first_or<'a>(items: &'a [String], fallback: &'a str) -> &'a str {
    nth_or(items, 0, fallback)
}

fn nth_or<'a>(items: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    items.get(index).map(String::as_str).unwrap_or(fallback)
}
