pub mod admin;
pub mod health;
pub mod resumes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Uploads are unbounded unless MAX_UPLOAD_BYTES is set
    let body_limit = match state.config.max_upload_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", post(resumes::handle_upload))
        .route(
            "/api/v1/admin/submissions",
            get(admin::handle_list_submissions),
        )
        .route(
            "/api/v1/admin/submissions/export",
            get(admin::handle_export_csv),
        )
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::{Config, ExtractorBackend};
    use crate::db::memory_pool;
    use crate::extraction::test_support::{reference_fields, StubBehaviour, StubExtractor};
    use crate::recommendation::Catalog;
    use crate::store::SubmissionStore;

    const BOUNDARY: &str = "analyser-test-boundary";

    fn test_config(max_upload_bytes: Option<usize>) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            extractor: ExtractorBackend::Heuristic,
            anthropic_api_key: None,
            anthropic_api_url: None,
            catalog_path: None,
            max_upload_bytes,
        }
    }

    async fn test_state(behaviour: StubBehaviour, max_upload_bytes: Option<usize>) -> AppState {
        AppState {
            store: SubmissionStore::open(memory_pool().await).await.unwrap(),
            extractor: Arc::new(StubExtractor::new(behaviour)),
            catalog: Arc::new(Catalog::bundled().unwrap()),
            config: test_config(max_upload_bytes),
        }
    }

    fn upload(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(StubBehaviour::Empty, None).await);
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "analyser");
    }

    #[tokio::test]
    async fn test_upload_returns_report() {
        let app = build_router(test_state(StubBehaviour::Fields(reference_fields()), None).await);
        let response = app
            .oneshot(upload("resume", "Ada.PDF", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["submission_id"], 1);
        assert_eq!(body["score"], 11);
        assert_eq!(body["category"], "data_science");
        assert_eq!(body["courses"].as_array().unwrap().len(), 3);
        assert_eq!(body["resume_videos"].as_array().unwrap().len(), 2);
        assert_eq!(body["interview_videos"].as_array().unwrap().len(), 2);
        assert_eq!(body["fields"]["skills"][2], "Machine Learning");
        assert_eq!(body["profile"][0]["label"], "Name");
        assert_eq!(body["profile"][0]["value"], "Ada Lovelace");
        assert_eq!(body["profile"][4]["value"], "N/A");
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_415() {
        let state = test_state(StubBehaviour::Fields(reference_fields()), None).await;
        let store = state.store.clone();
        let app = build_router(state);

        let response = app
            .oneshot(upload("resume", "resume.txt", b"plain text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_resume_field_is_400() {
        let app = build_router(test_state(StubBehaviour::Fields(reference_fields()), None).await);
        let response = app
            .oneshot(upload("attachment", "resume.pdf", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_422() {
        let state = test_state(StubBehaviour::Fail("unreadable".to_string()), None).await;
        let store = state.store.clone();
        let app = build_router(state);

        let response = app
            .oneshot(upload("resume", "resume.docx", b"PK"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error processing resume: "));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_is_422() {
        let app = build_router(test_state(StubBehaviour::Empty, None).await);
        let response = app
            .oneshot(upload("resume", "resume.pdf", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_RESULT");
        assert_eq!(
            body["error"]["message"],
            "Could not extract data from the resume. Please try another file."
        );
    }

    #[tokio::test]
    async fn test_large_upload_accepted_without_limit() {
        let app = build_router(test_state(StubBehaviour::Fields(reference_fields()), None).await);
        let content = vec![b'x'; 3 * 1024 * 1024];
        let response = app
            .oneshot(upload("resume", "resume.pdf", &content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_configured_limit_rejects_large_upload() {
        let state = test_state(StubBehaviour::Fields(reference_fields()), Some(1024)).await;
        let store = state.store.clone();
        let app = build_router(state);

        let content = vec![b'x'; 4096];
        let response = app
            .oneshot(upload("resume", "resume.pdf", &content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_listing_and_export() {
        let state = test_state(StubBehaviour::Fields(reference_fields()), None).await;
        let app = build_router(state);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(upload("resume", "resume.pdf", b"%PDF-1.4"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/admin/submissions"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["submissions"][0]["id"], 1);
        assert_eq!(body["submissions"][1]["id"], 2);
        assert_eq!(body["submissions"][1]["score"], 11);

        let response = app
            .oneshot(get_request("/api/v1/admin/submissions/export"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"user_data.csv\""
        );
        let csv = String::from_utf8(body_bytes(response).await).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Name,Email,Contact,Score,Date");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,Ada Lovelace,ada@example.com,+44 20 7946 0958,11,"));
    }
}
