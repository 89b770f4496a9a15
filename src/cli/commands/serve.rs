//! HTTP API server for integration with other systems.
//!
//! Exposes tool definitions, tool dispatch, and catalog stats over REST.

use crate::cli::Output;
use crate::session::{CourseSession, ToolOutcome};
use crate::tools::ToolDefinition;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state. The mutex serializes tool calls so one
/// request's sources never leak into another's.
type AppState = Arc<Mutex<CourseSession>>;

/// Build the API router over a session.
pub fn router(session: CourseSession) -> Router {
    let state: AppState = Arc::new(Mutex::new(session));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(call_tool))
        .route("/api/courses", get(course_stats))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, session: CourseSession) -> anyhow::Result<()> {
    let app = router(session);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP API listening on {}", addr);

    Output::header("Pensum API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Tool definitions", "GET  /api/tools");
    Output::kv("Call tool", "POST /api/tools/{name}");
    Output::kv("Courses", "GET  /api/courses");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    let session = state.lock().await;
    Json(session.tool_definitions())
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> Json<ToolOutcome> {
    let mut session = state.lock().await;
    Json(session.call_tool(&name, args).await)
}

async fn course_stats(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.lock().await;
    match session.course_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
