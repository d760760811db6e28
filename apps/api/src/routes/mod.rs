pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::report::handlers::handle_render_report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Standards API
        .route("/api/v1/standards", get(handlers::handle_get_standards))
        .route(
            "/api/v1/standards/extract",
            post(handlers::handle_extract_standards),
        )
        // Evaluation API
        .route(
            "/api/v1/evaluations/fixed",
            post(handlers::handle_evaluate_fixed),
        )
        .route(
            "/api/v1/evaluations/reference",
            post(handlers::handle_evaluate_reference),
        )
        // Report API
        .route("/api/v1/reports", post(handle_render_report))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::evaluation::{RequiredSectionSet, StylePolicy};

    const BOUNDARY: &str = "evaluator-test-boundary";

    fn test_app() -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            dictionary_path: None,
            style: StylePolicy::default(),
            required_sections: RequiredSectionSet::standard(),
            lenient_extraction: false,
            max_upload_bytes: 1024 * 1024,
        };
        build_router(AppState::from_config(config).unwrap())
    }

    /// (part name, optional file name, content)
    fn multipart(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_standards() {
        let response = test_app()
            .oneshot(Request::get("/api/v1/standards").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["sections"].as_array().unwrap().len(), 9);
        assert_eq!(json["style"]["font_family"], "Tenorite");
    }

    #[tokio::test]
    async fn test_fixed_evaluation_with_document_model() {
        let document = r#"{"paragraphs": [
            {"text": "Introduction", "style": "Heading 1"},
            {"text": "Budget", "style": "Heading 1",
             "runs": [{"text": "Budget", "font_name": "Arial", "font_size_pt": 16}]}
        ]}"#;
        let request = multipart(
            "/api/v1/evaluations/fixed",
            &[
                ("document", None, document),
                ("sections", None, r#"["Introduction", "Budget"]"#),
            ],
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["mode"], "fixed_policy");
        assert_eq!(json["formatting"]["font_ok"], false);
        assert_eq!(json["formatting"]["font_size_ok"], true);
        // 50 + 25 + 25
        assert_eq!(json["score"], 100.0);
        assert_eq!(
            json["recommendations"][0],
            "Document should use font 'Tenorite' throughout."
        );
    }

    #[tokio::test]
    async fn test_reference_evaluation_with_text_uploads() {
        let reference = "1. Introduction\n2. Objectives\n3. Team\n4. Risks\n";
        let proposal = "1. Introduction\n2. Objectives\n3. Team\nThe budget is $5,000.\n";
        let request = multipart(
            "/api/v1/evaluations/reference",
            &[
                ("reference", Some("standard.txt"), reference),
                ("proposal", Some("proposal.txt"), proposal),
            ],
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["mode"], "reference_derived");
        assert_eq!(json["score"], 66.67);
        assert_eq!(json["content"]["budget_ok"], true);
        assert_eq!(json["content"]["timeline_ok"], false);
    }

    #[tokio::test]
    async fn test_extract_standards_includes_notice() {
        let request = multipart(
            "/api/v1/standards/extract",
            &[("reference", Some("standard.md"), "1. Scope\n1. Scope\n2. Budget\n")],
        );
        let response = test_app().oneshot(request).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json["sections"], serde_json::json!(["1. Scope", "2. Budget"]));
        assert!(json["notice"].as_str().unwrap().contains("numbered headings"));
    }

    #[tokio::test]
    async fn test_reference_without_headings_is_configuration_error() {
        let request = multipart(
            "/api/v1/evaluations/reference",
            &[
                ("reference", Some("standard.txt"), "Introduction\nBudget\n"),
                ("proposal", Some("proposal.txt"), "Introduction"),
            ],
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_section_override_is_configuration_error() {
        let request = multipart(
            "/api/v1/evaluations/fixed",
            &[
                ("proposal", Some("proposal.txt"), "Introduction"),
                ("sections", None, "[]"),
            ],
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_extraction_error() {
        let request = multipart(
            "/api/v1/evaluations/fixed",
            &[("proposal", Some("proposal.docx"), "PK")],
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_proposal_is_validation_error() {
        let request = multipart(
            "/api/v1/evaluations/fixed",
            &[("sections", None, r#"["Budget"]"#)],
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_download() {
        let app = test_app();
        let evaluate = multipart(
            "/api/v1/evaluations/fixed",
            &[("proposal", Some("proposal.txt"), "Introduction\nBudget")],
        );
        let result = json_body(app.clone().oneshot(evaluate).await.unwrap()).await;
        assert_eq!(result["formatting"]["fonts_checked"], false);
        assert_eq!(result["formatting"]["spelling_checked"], false);

        let request = Request::post("/api/v1/reports")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(result.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"proposal_evaluation.md\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let markdown = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(markdown.starts_with("# Proposal Evaluation Report"));
        assert!(markdown.contains("- Budget: Present"));
        assert!(markdown.contains("- Missing sections: Table of content"));
        assert!(markdown.contains("Spelling was not checked: no dictionary is configured."));
        assert!(markdown.contains("the upload carries no run formatting"));
    }
}
