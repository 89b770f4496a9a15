//! End-to-end tool sessions over the fixture course library.

use pensum::session::CourseSession;
use pensum::store::MemoryCourseStore;
use pensum::tools::{Source, Tool, ToolDefinition};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

const MCP_COURSE: &str = "MCP: Build Rich-Context AI Apps with Anthropic";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("library.json")
}

fn session() -> CourseSession {
    let store = MemoryCourseStore::load(&fixture()).unwrap();
    CourseSession::new(Arc::new(store)).unwrap()
}

#[test]
fn advertises_both_tools_in_order() {
    let session = session();
    let names: Vec<_> = session
        .tool_definitions()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["search_course_content", "get_course_outline"]);
}

#[tokio::test]
async fn filtered_search_formats_and_cites() {
    let mut session = session();

    let output = session
        .execute_tool(
            "search_course_content",
            json!({"query": "what does a server expose", "course_name": "MCP", "lesson_number": 2}),
        )
        .await;

    assert_eq!(
        output,
        format!(
            "[{} - Lesson 2]\nAn MCP server exposes tools, resources and prompts to a client.",
            MCP_COURSE
        )
    );
    assert_eq!(
        session.last_sources(),
        &[Source {
            text: format!("{} - Lesson 2", MCP_COURSE),
            link: Some("https://learn.deeplearning.ai/courses/mcp/lesson/2".to_string()),
        }]
    );
}

#[tokio::test]
async fn hits_without_lessons_have_no_lesson_clause() {
    let mut session = session();

    let output = session
        .execute_tool("search_course_content", json!({"query": "chunking strategies"}))
        .await;

    assert_eq!(output, "[Retrieval Notes]\nChunking and embedding strategies for retrieval.");
    assert_eq!(session.last_sources()[0].text, "Retrieval Notes");
    assert_eq!(session.last_sources()[0].link, None);
}

#[tokio::test]
async fn multiple_hits_are_separated_by_blank_lines() {
    let mut session = session();

    let output = session
        .execute_tool("search_course_content", json!({"query": "tools"}))
        .await;

    let blocks: Vec<_> = output.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert_eq!(session.last_sources().len(), 3);
    for (block, source) in blocks.iter().zip(session.last_sources()) {
        assert!(block.starts_with(&format!("[{}]\n", source.text)));
    }
}

#[tokio::test]
async fn unknown_course_and_empty_results_are_text() {
    let mut session = session();

    let output = session
        .execute_tool("search_course_content", json!({"query": "x", "course_name": "Cooking"}))
        .await;
    assert_eq!(output, "No course found matching 'Cooking'");

    let output = session
        .execute_tool(
            "search_course_content",
            json!({"query": "zebra", "course_name": "computer use", "lesson_number": 2}),
        )
        .await;
    assert_eq!(output, "No relevant content found in course 'computer use' in lesson 2.");
    assert!(session.last_sources().is_empty());
}

#[tokio::test]
async fn outline_sorts_lessons() {
    let mut session = session();

    let output = session
        .execute_tool("get_course_outline", json!({"course_name": "mcp"}))
        .await;

    assert_eq!(
        output,
        format!(
            "Course Title: {}\n\
             Instructor: Elie Schoppik\n\
             Course Link: https://www.deeplearning.ai/short-courses/mcp-build-rich-context-ai-apps-with-anthropic/\n\
             \n\
             Lessons (3 total):\n\
             Lesson 0: Introduction\n\
             Lesson 1: Why MCP\n\
             Lesson 2: MCP Architecture",
            MCP_COURSE
        )
    );
    assert!(session.last_sources().is_empty());
}

#[tokio::test]
async fn outline_of_course_without_lessons() {
    let mut session = session();

    let output = session
        .execute_tool("get_course_outline", json!({"course_name": "retrieval"}))
        .await;

    assert_eq!(output, "Course Title: Retrieval Notes\n\nLessons (0 total):");
}

#[tokio::test]
async fn outline_for_unknown_course() {
    let mut session = session();
    let output = session
        .execute_tool("get_course_outline", json!({"course_name": "Quantum Baking"}))
        .await;
    assert_eq!(output, "No course found matching 'Quantum Baking'");
}

#[tokio::test]
async fn unknown_tool_is_reported() {
    let mut session = session();
    assert_eq!(
        session.execute_tool("nonexistent", json!({})).await,
        "Tool 'nonexistent' not found"
    );
}

#[tokio::test]
async fn sources_survive_outline_calls_until_reset() {
    let mut session = session();

    session
        .execute_tool("search_course_content", json!({"query": "computer use desktop"}))
        .await;
    let first = session.last_sources().to_vec();
    assert!(!first.is_empty());

    session
        .execute_tool("get_course_outline", json!({"course_name": "computer"}))
        .await;
    assert_eq!(session.last_sources(), first.as_slice());
    assert_eq!(session.last_sources(), session.last_sources());

    session.reset_sources();
    assert!(session.last_sources().is_empty());
}

#[tokio::test]
async fn call_tool_drains_sources() {
    let mut session = session();

    let outcome = session
        .call_tool("search_course_content", json!({"query": "model context protocol"}))
        .await;
    assert!(!outcome.sources.is_empty());
    assert!(outcome.result.starts_with(&format!("[{}", MCP_COURSE)));
    assert!(session.last_sources().is_empty());
}

#[tokio::test]
async fn course_stats_lists_titles() {
    let session = session();
    let stats = session.course_stats().await.unwrap();
    assert_eq!(stats.total_courses, 3);
    assert_eq!(stats.course_titles[2], "Retrieval Notes");
}

struct Shout;

#[async_trait::async_trait]
impl Tool for Shout {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("shout", "Upper-case the text").required("text", "string", "Text to shout")
    }

    async fn execute(&mut self, args: Value) -> String {
        args["text"].as_str().unwrap_or_default().to_uppercase()
    }
}

#[tokio::test]
async fn extra_tools_register_after_builtins() {
    let mut session = session();
    session.tools_mut().register(Shout).unwrap();

    let names: Vec<_> = session.tool_definitions().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["search_course_content", "get_course_outline", "shout"]);

    session
        .execute_tool("search_course_content", json!({"query": "computer use desktop"}))
        .await;
    let cited = session.last_sources().to_vec();
    assert!(!cited.is_empty());

    let outcome = session.call_tool("shout", json!({"text": "hello"})).await;
    assert_eq!(outcome.result, "HELLO");
    assert!(outcome.sources.is_empty());
}
