pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::jobs::handlers as jobs;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions and profile
        .route(
            "/api/v1/sessions",
            post(profile::handle_create_session).delete(profile::handle_delete_session),
        )
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_put_profile)
                .patch(profile::handle_patch_profile)
                .delete(profile::handle_delete_profile),
        )
        .route(
            "/api/v1/profile/completeness",
            get(profile::handle_completeness),
        )
        // Generation
        .route(
            "/api/v1/generate/career-plan",
            post(generation::handle_career_plan),
        )
        .route(
            "/api/v1/generate/mentor-advice",
            post(generation::handle_mentor_advice),
        )
        .route("/api/v1/generate/schemes", post(generation::handle_schemes))
        .route("/api/v1/generate/resume", post(generation::handle_resume))
        .route(
            "/api/v1/generate/confidence",
            post(generation::handle_confidence),
        )
        .route(
            "/api/v1/generate/dream-map",
            post(generation::handle_dream_map),
        )
        .route(
            "/api/v1/generate/simulation",
            post(generation::handle_simulation),
        )
        .route("/api/v1/results/:feature", get(generation::handle_get_result))
        // Job board
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::generation::capability::{CareerGenerator, GenerationError};
    use crate::generation::inputs::{
        ConfidenceInput, DreamMapInput, FlowProfile, ResumeInput, SimulationInput,
    };
    use crate::generation::outputs::{
        ConfidenceAssessment, DreamMap, LearningPlan, MentorAdvice, ResumeDraft,
        SchemeSuggestions, SimulationScenario,
    };
    use crate::generation::template::TemplateGenerator;
    use crate::session::{SessionLimits, SessionRegistry, SESSION_HEADER};

    fn app_with(generator: Arc<dyn CareerGenerator>) -> Router {
        build_router(AppState {
            sessions: SessionRegistry::default(),
            generator,
            config: Config::for_tests(),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(TemplateGenerator))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(session) = session {
            request = request.header(SESSION_HEADER, session);
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        session: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(SESSION_HEADER, session)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn field_names(body: &Value) -> Vec<String> {
        body["error"]["fields"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|f| f["field"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/v1/sessions", None, None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["sessionId"].as_str().unwrap().to_string()
    }

    fn asha_form() -> Value {
        json!({
            "name": " Asha ",
            "age": "22",
            "location": "Pune",
            "tenthMarks": "",
            "twelfthMarks": "78.5",
            "graduationStatus": "Completed",
            "skills": "Python, Excel, ",
            "languages": "Hindi,English",
            "projects": "Inventory tracker",
            "category": "none"
        })
    }

    async fn session_with_profile(app: &Router) -> String {
        let session = new_session(app).await;
        let (status, _) = send(app, "PUT", "/api/v1/profile", Some(&session), Some(asha_form())).await;
        assert_eq!(status, StatusCode::OK);
        session
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["generationBackend"], "template");
    }

    #[tokio::test]
    async fn test_put_profile_normalizes_and_fills_defaults() {
        let app = app();
        let session = new_session(&app).await;

        let (status, body) =
            send(&app, "PUT", "/api/v1/profile", Some(&session), Some(asha_form())).await;
        assert_eq!(status, StatusCode::OK);
        let profile = &body["profile"];
        assert_eq!(profile["name"], "Asha");
        assert_eq!(profile["age"], 22);
        assert_eq!(profile["skills"], json!(["Python", "Excel"]));
        assert_eq!(profile["languages"], json!(["Hindi", "English"]));
        assert!(profile["tenthMarks"].is_null());
        assert!(profile["category"].is_null());
        assert_eq!(profile["points"], 0);
        assert_eq!(profile["confidenceScore"], 0.0);
        assert_eq!(body["completeness"]["complete"], true);
    }

    #[tokio::test]
    async fn test_invalid_profile_returns_every_field_error() {
        let app = app();
        let session = new_session(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/profile",
            Some(&session),
            Some(json!({"age": "12", "location": "Pune", "graduationStatus": "Completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"age"));
        assert!(fields.contains(&"skills"));
        assert!(fields.contains(&"languages"));

        // Nothing was stored.
        let (_, body) = send(&app, "GET", "/api/v1/profile", Some(&session), None).await;
        assert!(body["profile"].is_null());
    }

    #[tokio::test]
    async fn test_session_header_is_required() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/profile", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let unknown = uuid::Uuid::new_v4().to_string();
        let (status, _) = send(&app, "GET", "/api/v1/profile", Some(&unknown), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generation_requires_profile() {
        let app = app();
        let session = new_session(&app).await;

        let (status, body) =
            send(&app, "POST", "/api/v1/generate/career-plan", Some(&session), None).await;
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["error"]["code"], "MISSING_PROFILE");
    }

    #[tokio::test]
    async fn test_patch_can_make_profile_incomplete() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/profile",
            Some(&session),
            Some(json!({"skills": []})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completeness"]["missingFields"], json!(["skills"]));

        let (status, body) =
            send(&app, "POST", "/api/v1/generate/schemes", Some(&session), None).await;
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["error"]["code"], "PROFILE_INCOMPLETE");
        assert_eq!(body["error"]["missingFields"], json!(["skills"]));
    }

    #[tokio::test]
    async fn test_patch_merges_single_field_and_clears_with_null() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/profile",
            Some(&session),
            Some(json!({"location": "Nagpur", "twelfthMarks": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["location"], "Nagpur");
        assert!(body["profile"]["twelfthMarks"].is_null());
        assert_eq!(body["profile"]["name"], "Asha");
    }

    #[tokio::test]
    async fn test_patch_without_profile_is_rejected() {
        let app = app();
        let session = new_session(&app).await;
        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/profile",
            Some(&session),
            Some(json!({"confidenceScore": 50})),
        )
        .await;
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["error"]["code"], "MISSING_PROFILE");
    }

    #[tokio::test]
    async fn test_delete_profile_logs_out() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, _) = send(&app, "DELETE", "/api/v1/profile", Some(&session), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) =
            send(&app, "GET", "/api/v1/profile/completeness", Some(&session), None).await;
        assert_eq!(body["complete"], false);
        assert_eq!(body["hasProfile"], false);
    }

    #[tokio::test]
    async fn test_resume_generation_and_result_lookup() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/generate/resume",
            Some(&session),
            Some(json!({"targetRole": "Data Analyst"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feature"], "resume");
        assert_eq!(body["backend"], "template");
        let resume = body["result"]["resumeText"].as_str().unwrap();
        assert!(resume.contains("related to Data Analyst"));
        assert!(resume.contains("10th Standard Marks: N/A"));

        let (status, stored) =
            send(&app, "GET", "/api/v1/results/resume", Some(&session), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["result"], body["result"]);

        let (status, _) =
            send(&app, "GET", "/api/v1/results/dream-map", Some(&session), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_communication_analysis_updates_confidence_score() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/generate/confidence",
            Some(&session),
            Some(json!({
                "assessmentType": "communicationAnalysis",
                "userResponse": "I would break the task into steps and ask for feedback early."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let score = body["result"]["assessmentResult"]["score"].as_f64().unwrap();

        let (_, body) = send(&app, "GET", "/api/v1/profile", Some(&session), None).await;
        assert_eq!(body["profile"]["confidenceScore"].as_f64(), Some(score));
    }

    #[tokio::test]
    async fn test_dream_map_requires_goal() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/generate/dream-map",
            Some(&session),
            Some(json!({"dreamGoal": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["fields"][0]["field"], "dreamGoal");
    }

    #[tokio::test]
    async fn test_simulation_runs_without_profile() {
        let app = app();
        let session = new_session(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/generate/simulation",
            Some(&session),
            Some(json!({"careerTitle": "Nurse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["scenarioTitle"], "A Day as a Nurse");
    }

    #[tokio::test]
    async fn test_get_profile_reports_last_update() {
        let app = app();
        let session = new_session(&app).await;
        let (_, body) = send(&app, "GET", "/api/v1/profile", Some(&session), None).await;
        assert!(body["updatedAt"].is_null());

        send(&app, "PUT", "/api/v1/profile", Some(&session), Some(asha_form())).await;
        let (_, body) = send(&app, "GET", "/api/v1/profile", Some(&session), None).await;
        assert!(body["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_put_profile_reports_wrongly_typed_fields() {
        let app = app();
        let session = new_session(&app).await;
        let mut form = asha_form();
        form["age"] = json!(true);
        form["name"] = json!("");

        let (status, body) = send(&app, "PUT", "/api/v1/profile", Some(&session), Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields = field_names(&body);
        assert!(fields.contains(&"name".to_string()));
        assert!(fields.contains(&"age".to_string()));
    }

    #[tokio::test]
    async fn test_patch_age_out_of_range_is_a_field_error() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/profile",
            Some(&session),
            Some(json!({"age": 300})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(field_names(&body), vec!["age"]);

        let (_, body) = send(&app, "GET", "/api/v1/profile", Some(&session), None).await;
        assert_eq!(body["profile"]["age"], 22);
    }

    #[tokio::test]
    async fn test_unparseable_bodies_use_error_format() {
        let app = app();
        let session = session_with_profile(&app).await;

        for (method, uri, raw) in [
            ("PATCH", "/api/v1/profile", "{"),
            ("PATCH", "/api/v1/profile", r#"{"nickname": "A"}"#),
            ("PATCH", "/api/v1/profile", r#"{"age": "twenty"}"#),
            ("PUT", "/api/v1/profile", r#""just text""#),
            ("POST", "/api/v1/generate/dream-map", r#"{"dreamGoal": 5}"#),
        ] {
            let (status, body) = send_raw(&app, method, uri, &session, raw).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri} {raw}");
            assert_eq!(body["error"]["code"], "BAD_REQUEST", "{method} {uri} {raw}");
        }
    }

    #[tokio::test]
    async fn test_optional_bodies_default_when_absent() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) =
            send(&app, "POST", "/api/v1/generate/confidence", Some(&session), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"]["assessmentResult"].is_array());

        let (status, _) =
            send(&app, "POST", "/api/v1/generate/resume", Some(&session), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_assessment_type_is_rejected() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/generate/confidence",
            Some(&session),
            Some(json!({
                "assessmentType": "communicationAnalysiss",
                "userResponse": "I plan my week on Sunday."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (status, _) =
            send(&app, "GET", "/api/v1/results/confidence", Some(&session), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_raw(
            &app,
            "POST",
            "/api/v1/generate/resume",
            &session,
            r#"{"targetRole": "#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_session_drops_its_state() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, _) = send(&app, "DELETE", "/api/v1/sessions", Some(&session), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/v1/profile", Some(&session), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", "/api/v1/sessions", Some(&session), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, health) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(health["activeSessions"], 0);
    }

    #[tokio::test]
    async fn test_session_cap_refuses_new_sessions() {
        let app = build_router(AppState {
            sessions: SessionRegistry::new(SessionLimits::new(1, 3600)),
            generator: Arc::new(TemplateGenerator),
            config: Config::for_tests(),
        });
        let first = new_session(&app).await;

        let (status, body) = send(&app, "POST", "/api/v1/sessions", None, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SESSION_LIMIT_REACHED");

        // Ending a session frees a slot.
        send(&app, "DELETE", "/api/v1/sessions", Some(&first), None).await;
        new_session(&app).await;
    }

    fn job_ids(body: &Value) -> Vec<&str> {
        body["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|job| job["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_jobs_list_local_openings_first() {
        let app = app();
        let session = session_with_profile(&app).await;

        let (status, body) = send(&app, "GET", "/api/v1/jobs", Some(&session), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            job_ids(&body),
            vec![
                "pune-swe",
                "pune-da",
                "jaipur-de",
                "haryana-sales",
                "gujarat-mech",
                "remote-csr",
            ]
        );
        assert_eq!(body["total"], 7);
        assert_eq!(body["hasMore"], true);
        assert_eq!(body["prioritizedLocation"], "Pune");
        assert_eq!(body["jobs"][0]["type"], "Internship");

        let (_, body) = send(&app, "GET", "/api/v1/jobs?limit=12", Some(&session), None).await;
        assert_eq!(job_ids(&body).last(), Some(&"jaipur-gd"));
        assert_eq!(body["hasMore"], false);
    }

    #[tokio::test]
    async fn test_jobs_search_and_limit_validation() {
        let app = app();
        let session = new_session(&app).await;

        let (status, body) =
            send(&app, "GET", "/api/v1/jobs?q=Data", Some(&session), None).await;
        assert_eq!(status, StatusCode::OK);
        // No profile, so catalog order is kept.
        assert_eq!(job_ids(&body), vec!["jaipur-de", "pune-da"]);
        assert!(body["prioritizedLocation"].is_null());

        let (status, body) =
            send(&app, "GET", "/api/v1/jobs?limit=0", Some(&session), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    /// Fails every call, to exercise the failure path.
    struct FailingGenerator;

    #[async_trait]
    impl CareerGenerator for FailingGenerator {
        fn backend(&self) -> &'static str {
            "failing"
        }

        async fn career_plan(&self, _: &FlowProfile) -> Result<LearningPlan, GenerationError> {
            Err(GenerationError::Malformed("no plan".to_string()))
        }

        async fn mentor_advice(&self, _: &FlowProfile) -> Result<MentorAdvice, GenerationError> {
            Err(GenerationError::Malformed("no advice".to_string()))
        }

        async fn schemes(&self, _: &FlowProfile) -> Result<SchemeSuggestions, GenerationError> {
            Err(GenerationError::Malformed("no schemes".to_string()))
        }

        async fn resume(&self, _: &ResumeInput) -> Result<ResumeDraft, GenerationError> {
            Err(GenerationError::Malformed("no resume".to_string()))
        }

        async fn confidence(
            &self,
            _: &ConfidenceInput,
        ) -> Result<ConfidenceAssessment, GenerationError> {
            Err(GenerationError::Malformed("no assessment".to_string()))
        }

        async fn dream_map(&self, _: &DreamMapInput) -> Result<DreamMap, GenerationError> {
            Err(GenerationError::Malformed("no steps".to_string()))
        }

        async fn simulation(
            &self,
            _: &SimulationInput,
        ) -> Result<SimulationScenario, GenerationError> {
            Err(GenerationError::Malformed("no scenario".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generation_failure_is_bad_gateway_and_stores_nothing() {
        let app = app_with(Arc::new(FailingGenerator));
        let session = session_with_profile(&app).await;

        let (status, body) =
            send(&app, "POST", "/api/v1/generate/career-plan", Some(&session), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");

        let (status, _) =
            send(&app, "GET", "/api/v1/results/career-plan", Some(&session), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The in-flight guard was released.
        let (status, _) =
            send(&app, "POST", "/api/v1/generate/career-plan", Some(&session), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
