pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health-check/", get(health::health_handler))
        .route("/api/process/", post(handlers::handle_process))
        .route("/api/get-candidates/", post(handlers::handle_get_candidates))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::config::{Config, StoreBackend};
    use crate::extraction::{AttributeExtractor, FieldExtractor, RawAttributes};
    use crate::llm_client::LlmError;
    use crate::models::candidate::{CandidateProfile, Qualification, Seniority};
    use crate::reader::{ReadError, ResumeReader};
    use crate::scoring::Scores;
    use crate::state::AppState;
    use crate::store::{CandidateStore, MemoryCandidateStore};

    const BOUNDARY: &str = "screener-test-boundary";

    struct StubReader(Option<&'static str>);

    impl ResumeReader for StubReader {
        fn read_text(&self, _bytes: &[u8]) -> Result<String, ReadError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| ReadError::Unreadable("invalid PDF header".to_string()))
        }
    }

    struct UnreachableLlm;

    #[async_trait]
    impl AttributeExtractor for UnreachableLlm {
        fn name(&self) -> &'static str {
            "unreachable-llm"
        }

        async fn extract(&self, _resume_text: &str) -> Result<RawAttributes, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    fn test_config() -> Config {
        Config {
            store_backend: StoreBackend::Memory,
            database_url: None,
            database_max_connections: 1,
            anthropic_api_key: "test".to_string(),
            llm_timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    fn app_with(reader_text: Option<&'static str>) -> (Router, Arc<MemoryCandidateStore>) {
        let store = Arc::new(MemoryCandidateStore::new());
        let state = AppState {
            store: store.clone(),
            extractor: FieldExtractor::new(Arc::new(UnreachableLlm), Duration::from_secs(5)),
            reader: Arc::new(StubReader(reader_text)),
            config: test_config(),
        };
        (build_router(state), store)
    }

    fn upload(content_type: &str, file_name: &str, body: &[u8]) -> Request<Body> {
        let mut payload = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        payload.extend_from_slice(body);
        payload.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        multipart_request(payload)
    }

    fn multipart_request(payload: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/process/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(payload))
            .unwrap()
    }

    fn list(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/get-candidates/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn seed(store: &MemoryCandidateStore, count: usize) {
        for i in 0..count {
            let (skills, seniority): (Vec<String>, Seniority) = if i % 2 == 0 {
                (vec!["React".into(), "CSS".into()], Seniority::Senior)
            } else {
                (vec!["Python".into()], Seniority::Mid)
            };
            let mut candidate = CandidateProfile::new(
                format!("Seeded {i}"),
                skills,
                Scores {
                    fe_score: (i as i32 * 4).min(100),
                    be_score: 50,
                },
                seniority,
                Qualification::Bachelors,
            );
            candidate.created_at += chrono::Duration::seconds(i as i64);
            candidate.updated_at = candidate.created_at;
            store.insert(&candidate).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = app_with(None);
        let request = Request::builder()
            .uri("/api/health-check/")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_process_falls_back_when_llm_fails() {
        let (app, store) = app_with(Some(
            "Jane Doe\njane@example.com\nSenior React Developer, Python, Django\nB.S. Computer Science",
        ));

        let (status, body) = send(&app, upload("application/pdf", "jane.pdf", b"%PDF-1.4 stub")).await;

        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["extraction_source"], "fallback");
        let data = &body["candidate_data"];
        assert_eq!(data["name"], "Jane Doe");
        assert_eq!(data["seniority"], "senior");
        assert_eq!(data["qualifications"], "bachelors");
        assert!(data["fe_score"].as_i64().unwrap() >= 30);
        assert!(data["be_score"].as_i64().unwrap() >= 30);
        let skills: Vec<&str> = data["skills"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(skills.contains(&"React"));
        assert!(skills.contains(&"Python"));
        assert!(skills.contains(&"Django"));

        let stored = store.query(&Default::default(), 1).await.unwrap();
        assert_eq!(stored.total_count, 1);
        assert_eq!(body["candidate_id"], stored.candidates[0].id.to_string());
    }

    #[tokio::test]
    async fn test_process_without_resume_field_is_bad_request() {
        let (app, store) = app_with(Some("Jane Doe"));
        let payload = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
        );
        let (status, body) = send(&app, multipart_request(payload.into_bytes())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(store.query(&Default::default(), 1).await.unwrap().total_count, 0);
    }

    #[tokio::test]
    async fn test_process_rejects_non_pdf() {
        let (app, _) = app_with(Some("Jane Doe"));
        let (status, _) = send(&app, upload("text/plain", "cv.txt", b"Jane Doe")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_process_rejects_empty_file() {
        let (app, _) = app_with(Some("Jane Doe"));
        let (status, _) = send(&app, upload("application/pdf", "cv.pdf", b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_process_rejects_non_multipart_body() {
        let (app, _) = app_with(Some("Jane Doe"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/process/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_server_error_and_persists_nothing() {
        let (app, store) = app_with(None);
        let (status, body) = send(&app, upload("application/pdf", "cv.pdf", b"%PDF-broken")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert_eq!(store.query(&Default::default(), 1).await.unwrap().total_count, 0);
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let (app, store) = app_with(None);
        seed(&store, 23).await;

        let mut seen = 0;
        for page in 1..=3 {
            let (status, body) = send(&app, list(json!({ "page": page }))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["total_count"], 23);
            assert_eq!(body["total_pages"], 3);
            seen += body["candidates"].as_array().unwrap().len();
        }
        assert_eq!(seen, 23);

        let (_, first) = send(&app, list(json!({ "page": 1 }))).await;
        assert_eq!(first["candidates"][0]["name"], "Seeded 22");

        let (status, beyond) = send(&app, list(json!({ "page": 4 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(beyond["candidates"].as_array().unwrap().is_empty());
        assert_eq!(beyond["total_count"], 23);
    }

    #[tokio::test]
    async fn test_list_applies_all_filters() {
        let (app, store) = app_with(None);
        seed(&store, 23).await;

        let (status, body) = send(
            &app,
            list(json!({
                "page": 1,
                "skills": ["react"],
                "seniorityLevel": "senior",
                "fe_score": 40
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Even indices 10..=22 have fe_score >= 40
        assert_eq!(body["total_count"], 7);
        for c in body["candidates"].as_array().unwrap() {
            assert_eq!(c["seniority"], "senior");
            assert!(c["fe_score"].as_i64().unwrap() >= 40);
        }
        assert_eq!(body["filters_applied"]["seniorityLevel"], "senior");
        assert_eq!(body["filters_applied"]["fe_score"], 40);
    }

    #[tokio::test]
    async fn test_list_rejects_invalid_filters() {
        let (app, _) = app_with(None);

        let (status, body) = send(&app, list(json!({ "page": 1, "be_score": 250 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_FILTER");
        assert_eq!(body["error"]["field"], "be_score");

        let (status, body) = send(&app, list(json!({ "seniorityLevel": "ninja" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "seniorityLevel");

        let (status, _) = send(&app, list(json!({ "page": "two" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
