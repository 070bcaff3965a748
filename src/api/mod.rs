/// API routes and handlers
pub mod auth;
pub mod course_notes;
pub mod onboarding;

use crate::{context::AppContext, error::RecordsError};
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(auth::routes())
        .merge(onboarding::routes())
        .merge(course_notes::routes())
}

/// Fallback for registered paths hit with the wrong verb. Keeps 405
/// responses in the same JSON error shape as everything else.
pub(crate) async fn method_not_allowed() -> RecordsError {
    RecordsError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{BlobstoreConfig, LoggingConfig, RateLimitConfig, ServerConfig, ServiceConfig},
        context::AppContext,
        object_store::MemoryObjectStore,
        server,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 0,
                version: "0.1.0".to_string(),
            },
            blobstore: BlobstoreConfig::Memory,
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    fn test_app() -> (axum::Router, Arc<MemoryObjectStore>) {
        let backend = Arc::new(MemoryObjectStore::new());
        let ctx = AppContext::with_object_store(test_config(), backend.clone());
        (server::build_router(ctx), backend)
    }

    fn post_json(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn login_persists_record_and_returns_session_id() {
        let (app, backend) = test_app();

        let response = app
            .oneshot(post_json("/auth/login", json!({"email": "a@b.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["sessionId"].as_str().unwrap().starts_with("session_"));
        assert!(body["blobUrl"].as_str().unwrap().starts_with("memory://"));

        let keys = backend.keys();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("logins/student/a_at_b.com_"));
    }

    #[tokio::test]
    async fn login_without_email_is_rejected_before_storage() {
        let (app, backend) = test_app();

        let response = app
            .oneshot(post_json("/auth/login", json!({"userType": "student"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("email"));
        assert_eq!(backend.put_count(), 0);
    }

    #[tokio::test]
    async fn wrong_verb_gets_405_json_body() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/auth/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn signup_requires_email_inside_user_data() {
        let (app, backend) = test_app();

        let response = app
            .oneshot(post_json("/auth/signup", json!({"userData": {}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("userData.email"));
        assert_eq!(backend.put_count(), 0);
    }

    #[tokio::test]
    async fn signup_returns_user_id_and_merges_profile() {
        let (app, backend) = test_app();

        let response = app
            .oneshot(post_json(
                "/auth/signup",
                json!({"userData": {"email": "ada@demo.com", "name": "Ada"}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["userId"].as_str().unwrap().starts_with("user_"));

        let keys = backend.keys();
        assert!(keys[0].starts_with("student/ada_at_demo.com_"));
        let stored: Value = serde_json::from_str(&backend.object(&keys[0]).unwrap()).unwrap();
        assert_eq!(stored["name"], "Ada");
    }

    #[tokio::test]
    async fn onboarding_complete_round_trip() {
        let (app, backend) = test_app();

        let response = app
            .oneshot(post_json(
                "/onboarding/complete",
                json!({
                    "userId": "user_1_abcdefghi",
                    "email": "a@b.com",
                    "onboardingData": {"goals": ["design"], "pace": "evenings"}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["onboardingId"]
            .as_str()
            .unwrap()
            .starts_with("onboarding_"));

        let keys = backend.keys();
        assert!(keys[0].starts_with("onboarding/student/a_at_b.com_"));
    }

    #[tokio::test]
    async fn onboarding_names_all_missing_fields() {
        let (app, _) = test_app();

        let response = app
            .oneshot(post_json("/onboarding/complete", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await["error"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(error.contains("userId"));
        assert!(error.contains("onboardingData"));
    }

    #[tokio::test]
    async fn course_note_upload_sanitizes_key() {
        let (app, backend) = test_app();

        let response = app
            .oneshot(post_json(
                "/course-notes/upload",
                json!({
                    "courseTitle": "Intro to Design",
                    "documentTitle": "Week 1",
                    "fileName": "notes.pdf",
                    "fileContent": "lecture notes"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["courseNoteId"]
            .as_str()
            .unwrap()
            .starts_with("course-note_"));

        let keys = backend.keys();
        assert!(keys[0].starts_with("course-notes/Intro_to_Design/notes_pdf_"));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_500_with_details() {
        use crate::error::{RecordsError, RecordsResult};
        use crate::object_store::{ObjectStore, PutOptions, StoredObject};
        use async_trait::async_trait;

        struct FailingStore;

        #[async_trait]
        impl ObjectStore for FailingStore {
            async fn put(
                &self,
                _key: &str,
                _body: String,
                _opts: PutOptions,
            ) -> RecordsResult<StoredObject> {
                Err(RecordsError::Storage("bucket unavailable".to_string()))
            }
        }

        let ctx = AppContext::with_object_store(test_config(), Arc::new(FailingStore));
        let app = server::build_router(ctx);

        let response = app
            .oneshot(post_json("/auth/login", json!({"email": "a@b.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Storage error");
        assert!(body["details"].as_str().unwrap().contains("bucket unavailable"));
    }

    #[tokio::test]
    async fn login_then_session_then_logout() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(post_json("/auth/login", json!({"email": "a@b.com"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/auth/session?email=a@b.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"], "a@b.com");

        let response = app
            .clone()
            .oneshot(post_json("/auth/logout", json!({"email": "a@b.com"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/session?email=a@b.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["authenticated"], false);
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_path_gets_json_404() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "NotFound");
    }
}
