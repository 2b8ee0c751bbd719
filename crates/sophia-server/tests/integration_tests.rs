//! Integration tests for the HTTP server

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sophia_brain::{Brain, BrainConfig};
use sophia_context::ContextExport;
use sophia_server::handlers::{
    create_router, AppState, CapabilitiesResponse, CreateSessionResponse, ErrorResponse,
    HealthCheckResponse, MessageResponse, ReviewResponse,
};
use tower::ServiceExt; // for oneshot

fn create_test_app() -> Router {
    create_router(AppState::new(Brain::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.session_count, 0);
    assert_eq!(health.provenance_records, 0);
}

#[tokio::test]
async fn test_create_session_then_export() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/brain/session", None).await;
    assert_eq!(status, StatusCode::OK);
    let session: CreateSessionResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(session.capabilities.len(), 7);

    let (status, body) = send(&app, "GET", &format!("/brain/context/{}", session.session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let export: ContextExport = serde_json::from_slice(&body).unwrap();
    assert_eq!(export.metadata.session_id, session.session_id);
    assert_eq!(export.summary.message_count, 1);
}

#[tokio::test]
async fn test_message_flow() {
    let app = create_test_app();

    let graph = json!({
        "nodes": [
            {"id": "n1", "label": "The Void", "category": "concept"},
            {"id": "n2", "label": "Anxiety", "category": "emotion"}
        ],
        "links": [{"source": "n1", "target": "n2"}]
    });

    let (status, body) = send(
        &app,
        "POST",
        "/brain/message",
        Some(json!({"session_id": "s1", "message": "organize my graph", "graph_data": graph})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let reply: MessageResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(reply.response.intent.to_string(), "organize");
    assert_eq!(reply.context_summary.message_count, 3);
    assert_eq!(reply.context_summary.snapshot_count, 1);

    let (status, _) = send(
        &app,
        "POST",
        "/brain/message",
        Some(json!({"session_id": "s1", "message": "brainstorm about despair"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/brain/provenance", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats["total_records"], 3);
}

#[tokio::test]
async fn test_message_missing_input() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/brain/message", Some(json!({"message": "hello"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("session_id"));

    let (status, _) = send(&app, "POST", "/brain/message", Some(json!({"session_id": "s1", "message": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = create_test_app();

    let (status, _) = send(&app, "GET", "/brain/context/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/brain/context/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_test_app();

    send(&app, "POST", "/brain/message", Some(json!({"session_id": "s1", "message": "hi"}))).await;

    let (status, _) = send(&app, "DELETE", "/brain/context/s1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/brain/context/s1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_flow() {
    let app = create_test_app();

    send(&app, "POST", "/brain/message", Some(json!({"session_id": "s1", "message": "brainstorm despair"}))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/brain/provenance/review",
        Some(json!({"content_id": "transcendent-despair", "reviewer": "ana", "rating": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let review: ReviewResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(review.content_id, "transcendent-despair");
    assert!(review.quality_score > 0.0 && review.quality_score <= 1.0);

    let (status, _) = send(
        &app,
        "POST",
        "/brain/provenance/review",
        Some(json!({"content_id": "transcendent-despair", "rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/brain/provenance/review",
        Some(json!({"content_id": "transcendent-despair", "rating": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/brain/provenance/review",
        Some(json!({"content_id": "unknown", "rating": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_capabilities_endpoint() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/brain/capabilities", None).await;
    assert_eq!(status, StatusCode::OK);
    let caps: CapabilitiesResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(caps.capabilities.len(), 7);
}

#[tokio::test]
async fn test_scoped_content_ids() {
    let config = BrainConfig::multi_tenant();
    let app = create_router(AppState::new(Brain::new(config)));

    send(&app, "POST", "/brain/message", Some(json!({"session_id": "s1", "message": "brainstorm void"}))).await;

    let (status, _) = send(
        &app,
        "POST",
        "/brain/provenance/review",
        Some(json!({"content_id": "s1:transcendent-void", "rating": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_messages_get_their_own_summary() {
    let app = create_test_app();

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let body = json!({"session_id": "shared", "message": format!("hello {}", i)});
                send(&app, "POST", "/brain/message", Some(body)).await
            })
        })
        .collect();

    let mut counts = Vec::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let reply: MessageResponse = serde_json::from_slice(&body).unwrap();
        counts.push(reply.context_summary.message_count);
    }

    // Greeting plus two messages per exchange, each summary taken right after its own
    counts.sort_unstable();
    let expected: Vec<usize> = (0..8).map(|i| 3 + 2 * i).collect();
    assert_eq!(counts, expected);
}
