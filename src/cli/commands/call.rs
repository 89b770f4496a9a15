//! Tool call commands: search, outline, and generic dispatch.

use crate::cli::Output;
use crate::session::CourseSession;
use crate::tools::{OUTLINE_TOOL_NAME, SEARCH_TOOL_NAME};
use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Run the search command.
pub async fn run_search(
    query: &str,
    course: Option<String>,
    lesson: Option<i64>,
    session: &mut CourseSession,
) -> Result<()> {
    let args = json!({
        "query": query,
        "course_name": course,
        "lesson_number": lesson,
    });
    call_and_print(session, SEARCH_TOOL_NAME, args).await
}

/// Run the outline command.
pub async fn run_outline(course: &str, session: &mut CourseSession) -> Result<()> {
    call_and_print(session, OUTLINE_TOOL_NAME, json!({ "course_name": course })).await
}

/// Run the call command.
pub async fn run_call(name: &str, args: &str, session: &mut CourseSession) -> Result<()> {
    let args: Value = serde_json::from_str(args).context("--args must be a JSON object")?;
    if !args.is_object() {
        anyhow::bail!("--args must be a JSON object, got {}", args);
    }

    if !session.tools().contains(name) {
        Output::warning(&format!(
            "No tool named '{}'. Available: {}",
            name,
            session.tools().tool_names().join(", ")
        ));
    }

    call_and_print(session, name, args).await
}

async fn call_and_print(session: &mut CourseSession, name: &str, args: Value) -> Result<()> {
    let outcome = session.call_tool(name, args).await;
    Output::tool_result(&outcome.result, &outcome.sources);
    Ok(())
}
