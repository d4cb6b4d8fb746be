pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::document::handlers as document;
use crate::enhance::handlers as enhance;
use crate::export::handlers as export;
use crate::layout::handlers as layout;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document and section order
        .route(
            "/api/v1/document",
            get(document::handle_get_document).put(document::handle_replace_document),
        )
        .route("/api/v1/document/reset", post(document::handle_reset_document))
        .route("/api/v1/document/edits", post(document::handle_apply_edit))
        .route("/api/v1/document/sections", get(document::handle_get_sections))
        .route(
            "/api/v1/document/sections/reset",
            post(document::handle_reset_sections),
        )
        .route(
            "/api/v1/document/sections/:key/:direction",
            post(document::handle_move_section),
        )
        // Projection and export
        .route("/api/v1/preview", get(layout::handle_preview))
        .route("/api/v1/export", get(export::handle_export))
        // Text enhancement
        .route("/api/v1/enhance/summary", post(enhance::handle_enhance_summary))
        .route(
            "/api/v1/enhance/description",
            post(enhance::handle_enhance_description),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use super::*;
    use crate::document::demo::demo_document;
    use crate::document::EditorSession;
    use crate::enhance::{EnhanceError, Enhancement, OfflineEnhancer, TextEnhancer};
    use crate::export::{ExportOptions, PdfExporter};
    use crate::llm_client::LlmError;

    /// Returns a fixed text and records what it was asked to refine.
    struct CannedEnhancer {
        text: String,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextEnhancer for CannedEnhancer {
        async fn summarize(&self, role: &str, skills: &str) -> Result<Enhancement, EnhanceError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(format!("{role}|{skills}"));
            }
            Ok(Enhancement::Generated(self.text.clone()))
        }

        async fn refine(&self, text: &str) -> Result<Enhancement, EnhanceError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(text.to_string());
            }
            Ok(Enhancement::Generated(self.text.clone()))
        }

        fn backend(&self) -> &'static str {
            "canned"
        }
    }

    struct FailingEnhancer;

    #[async_trait]
    impl TextEnhancer for FailingEnhancer {
        async fn summarize(&self, _: &str, _: &str) -> Result<Enhancement, EnhanceError> {
            Err(LlmError::EmptyContent.into())
        }

        async fn refine(&self, _: &str) -> Result<Enhancement, EnhanceError> {
            Err(LlmError::EmptyContent.into())
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn make_state(enhancer: Arc<dyn TextEnhancer>) -> AppState {
        AppState {
            session: Arc::new(RwLock::new(EditorSession::new(demo_document()))),
            enhancer,
            exporter: Arc::new(PdfExporter),
            export_options: ExportOptions::default(),
        }
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let app = build_router(make_state(Arc::new(OfflineEnhancer)));
        let (status, body) = send_json(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["enhancer"], "offline");
    }

    #[tokio::test]
    async fn test_edit_updates_document_and_revision() {
        let state = make_state(Arc::new(OfflineEnhancer));
        let app = build_router(state.clone());
        let (status, body) = send_json(
            app,
            "POST",
            "/api/v1/document/edits",
            Some(json!({"op": "set_summary", "value": "Hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revision"], 1);
        assert_eq!(body["document"]["summary"], "Hello");
        assert_eq!(state.session.read().await.snapshot().summary, "Hello");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_conflict() {
        let app = build_router(make_state(Arc::new(OfflineEnhancer)));
        let (status, body) = send_json(
            app,
            "POST",
            "/api/v1/document/edits",
            Some(json!({"op": "add_project", "id": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_move_section_and_reset() {
        let state = make_state(Arc::new(OfflineEnhancer));
        let (status, body) = send_json(
            build_router(state.clone()),
            "POST",
            "/api/v1/document/sections/skills/up",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][2]["key"], "skills");
        assert_eq!(body["isDefault"], false);

        let (_, body) = send_json(
            build_router(state.clone()),
            "POST",
            "/api/v1/document/sections/reset",
            None,
        )
        .await;
        assert_eq!(body["isDefault"], true);
        assert_eq!(body["sections"][0]["canMoveUp"], false);
    }

    #[tokio::test]
    async fn test_unknown_section_key_is_noop() {
        let state = make_state(Arc::new(OfflineEnhancer));
        let (status, body) = send_json(
            build_router(state.clone()),
            "POST",
            "/api/v1/document/sections/hobbies/down",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revision"], 0);
    }

    #[tokio::test]
    async fn test_preview_honours_template_override() {
        let app = build_router(make_state(Arc::new(OfflineEnhancer)));
        let (status, body) =
            send_json(app, "GET", "/api/v1/preview?template=modern", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], "modern");
        assert_eq!(body["regions"][0]["kind"], "sidebar");
    }

    #[tokio::test]
    async fn test_offline_enhance_returns_notice_without_change() {
        let state = make_state(Arc::new(OfflineEnhancer));
        let before = state.session.read().await.snapshot();
        let (status, body) = send_json(
            build_router(state.clone()),
            "POST",
            "/api/v1/enhance/summary",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], false);
        assert!(body["notice"].as_str().is_some());
        assert_eq!(state.session.read().await.snapshot(), before);
    }

    #[tokio::test]
    async fn test_enhance_description_applies_result() {
        let enhancer = Arc::new(CannedEnhancer {
            text: "• Shipped faster".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let state = make_state(enhancer.clone());
        let (status, body) = send_json(
            build_router(state.clone()),
            "POST",
            "/api/v1/enhance/description",
            Some(json!({"list": "experience", "id": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], true);
        let doc = state.session.read().await.snapshot();
        assert_eq!(doc.experience[0].description, "• Shipped faster");
        assert_eq!(enhancer.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_enhance_blank_description_is_validation_error() {
        let state = make_state(Arc::new(OfflineEnhancer));
        let (status, body) = send_json(
            build_router(state),
            "POST",
            "/api/v1/enhance/description",
            Some(json!({"list": "experience", "id": "3"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_enhance_failure_is_bad_gateway() {
        let state = make_state(Arc::new(FailingEnhancer));
        let before = state.session.read().await.snapshot();
        let (status, body) = send_json(
            build_router(state.clone()),
            "POST",
            "/api/v1/enhance/summary",
            Some(json!({"role": "Engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "Failed to generate");
        assert_eq!(state.session.read().await.snapshot(), before);
    }

    #[tokio::test]
    async fn test_export_downloads_pdf() {
        let app = build_router(make_state(Arc::new(OfflineEnhancer)));
        let request = Request::builder()
            .uri("/api/v1/export")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Morgan Ellery - CV.pdf"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_of_blank_modern_document_succeeds() {
        let state = make_state(Arc::new(OfflineEnhancer));
        state.session.write().await.replace(Default::default()).unwrap();
        let (status, bytes) = send(
            build_router(state),
            "GET",
            "/api/v1/export?template=modern",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_replace_with_duplicate_ids_is_conflict() {
        let state = make_state(Arc::new(OfflineEnhancer));
        let before = state.session.read().await.snapshot();
        let mut doc = serde_json::to_value(&*before).unwrap();
        doc["education"] = json!([{"id": "dup"}, {"id": "dup"}]);

        let (status, body) =
            send_json(build_router(state.clone()), "PUT", "/api/v1/document", Some(doc)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(state.session.read().await.snapshot(), before);
        assert_eq!(state.session.read().await.revision(), 0);
    }
}
