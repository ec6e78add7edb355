//! Integration tests for the HTTP API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; the
//! upstream model is replaced with a recording stub.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use penwright::editor::{EditAction, EditError, TextEditor};
use penwright::{create_router, AppState};

/// Records every call and answers with a canned result.
struct StubEditor {
    calls: Mutex<Vec<(EditAction, String)>>,
    reply: fn() -> Result<String, EditError>,
}

impl StubEditor {
    fn replying(reply: fn() -> Result<String, EditError>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply,
        })
    }
}

#[async_trait]
impl TextEditor for StubEditor {
    async fn edit(&self, action: EditAction, text: &str) -> Result<String, EditError> {
        self.calls.lock().unwrap().push((action, text.to_string()));
        (self.reply)()
    }
}

fn setup() -> Router {
    create_router(AppState::new(None))
}

fn setup_with_editor(editor: Arc<StubEditor>) -> Router {
    let editor: Arc<dyn TextEditor> = editor;
    create_router(AppState::new(Some(editor)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn proc_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/proc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

// ==================== HEALTH ====================

#[tokio::test]
async fn test_health_check() {
    let response = setup().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json, serde_json::json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_health_ignores_headers_and_query() {
    let app = setup();
    let plain = body_bytes(app.clone().oneshot(get("/health")).await.unwrap()).await;

    let decorated = Request::builder()
        .uri("/health?verbose=true&probe=readiness")
        .header("x-custom", "anything")
        .header(header::ACCEPT, "text/plain")
        .body(Body::from("ignored body"))
        .unwrap();
    let response = app.oneshot(decorated).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, plain);
}

#[tokio::test]
async fn test_health_concurrent_requests_are_identical() {
    let app = setup();

    let responses = futures::future::join_all(
        (0..100).map(|_| app.clone().oneshot(get("/health"))),
    )
    .await;

    let mut bodies = Vec::with_capacity(responses.len());
    for response in responses {
        let response = response.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(body_bytes(response).await);
    }

    assert_eq!(bodies.len(), 100);
    assert!(bodies.iter().all(|body| body == &bodies[0]));
    assert_eq!(bodies[0], br#"{"status":"OK"}"#);
}

#[tokio::test]
async fn test_health_path_is_case_sensitive() {
    let response = setup().oneshot(get("/Health")).await.unwrap();

    assert_ne!(response.status(), StatusCode::OK);
    assert_ne!(body_bytes(response).await, br#"{"status":"OK"}"#);
}

#[tokio::test]
async fn test_health_rejects_other_methods() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = setup().oneshot(request).await.unwrap();

    assert_ne!(response.status(), StatusCode::OK);
    assert_ne!(body_bytes(response).await, br#"{"status":"OK"}"#);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup();
    let first = app.clone().oneshot(get("/health")).await.unwrap();
    let second = app.oneshot(get("/health")).await.unwrap();

    let first_id = first.headers()["x-request-id"].clone();
    let second_id = second.headers()["x-request-id"].clone();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = setup().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

// ==================== PROC ====================

#[tokio::test]
async fn test_proc_returns_edited_text_as_json_string() {
    let editor = StubEditor::replying(|| Ok("Bonjour le monde".to_string()));
    let app = setup_with_editor(editor.clone());

    let response = app
        .oneshot(proc_request(serde_json::json!({
            "text": "Hello world",
            "command": "translate"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json, serde_json::json!("Bonjour le monde"));

    let calls = editor.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(EditAction::Translate, "Hello world".to_string())]
    );
}

#[tokio::test]
async fn test_proc_unknown_command_is_bad_request() {
    let editor = StubEditor::replying(|| Ok("unused".to_string()));
    let app = setup_with_editor(editor.clone());

    let response = app
        .oneshot(proc_request(serde_json::json!({
            "text": "Hello",
            "command": "shout"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["error"], "Invalid action type: shout");
    assert!(editor.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_proc_without_editor_is_unavailable() {
    let response = setup()
        .oneshot(proc_request(serde_json::json!({
            "text": "Hello",
            "command": "summarize"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["error"], "Text editor is not configured");
}

#[tokio::test]
async fn test_proc_upstream_error_is_bad_gateway() {
    let editor =
        StubEditor::replying(|| Err(EditError::Api("Rate limit reached".to_string())));
    let app = setup_with_editor(editor);

    let response = app
        .oneshot(proc_request(serde_json::json!({
            "text": "Hello",
            "command": "expand"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["error"], "API Error: Rate limit reached");
}

#[tokio::test]
async fn test_proc_no_choices_is_bad_gateway() {
    let app = setup_with_editor(StubEditor::replying(|| Err(EditError::NoChoices)));

    let response = app
        .oneshot(proc_request(serde_json::json!({
            "text": "Hello",
            "command": "paraphrase"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_proc_rejects_missing_fields() {
    let editor = StubEditor::replying(|| Ok("unused".to_string()));
    let app = setup_with_editor(editor.clone());

    let response = app
        .oneshot(proc_request(serde_json::json!({ "text": "Hello" })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(editor.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_proc_rejects_get() {
    let response = setup().oneshot(get("/proc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
