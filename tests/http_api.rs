//! HTTP API routes over the fixture course library.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use pensum::cli::commands::router;
use pensum::session::CourseSession;
use pensum::store::MemoryCourseStore;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("library.json");
    let store = MemoryCourseStore::load(&path).unwrap();
    router(CourseSession::new(Arc::new(store)).unwrap())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn lists_tool_definitions() {
    let (status, body) = send(Request::get("/api/tools").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "search_course_content");
    assert_eq!(body[0]["input_schema"]["type"], "object");
    assert_eq!(body[1]["name"], "get_course_outline");
}

#[tokio::test]
async fn calls_search_with_sources() {
    let (status, body) = send(post_json(
        "/api/tools/search_course_content",
        json!({"query": "server", "course_name": "MCP", "lesson_number": 2}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].as_str().unwrap().contains("- Lesson 2]\n"));
    assert_eq!(
        body["sources"][0]["link"],
        "https://learn.deeplearning.ai/courses/mcp/lesson/2"
    );
}

#[tokio::test]
async fn unknown_tool_is_still_ok() {
    let (status, body) = send(post_json("/api/tools/nonexistent", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Tool 'nonexistent' not found");
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn course_stats() {
    let (status, body) = send(Request::get("/api/courses").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_courses"], 3);
}
