//! Course outline tool.

use super::{display, parse_args, Tool, ToolDefinition};
use crate::error::Result;
use crate::store::{parse_lessons, CourseStore, Metadata};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Name advertised for [`OutlineTool`].
pub const OUTLINE_TOOL_NAME: &str = "get_course_outline";

/// Renders a course's title, instructor, link and ordered lesson list.
pub struct OutlineTool {
    store: Arc<dyn CourseStore>,
}

#[derive(Debug, Deserialize)]
struct OutlineArgs {
    course_name: String,
}

impl OutlineTool {
    /// Create an outline tool over a course store.
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    /// Resolve a partial course name and render its outline.
    #[instrument(skip(self))]
    pub async fn outline(&self, course_name: &str) -> String {
        let title = match self.store.resolve_course_name(course_name).await {
            Ok(Some(title)) => title,
            Ok(None) => return format!("No course found matching '{}'", course_name),
            Err(e) => return format!("Error retrieving course outline: {}", e),
        };
        debug!("Resolved '{}' to '{}'", course_name, title);

        match self.outline_for(&title).await {
            Ok(text) => text,
            Err(e) => format!("Error retrieving course outline: {}", e),
        }
    }

    async fn outline_for(&self, title: &str) -> Result<String> {
        match self.store.course_metadata(title).await? {
            Some(metadata) if !metadata.is_empty() => render_outline(&metadata),
            _ => Ok(format!("No metadata found for course '{}'", title)),
        }
    }
}

/// Render a catalog record as an outline.
///
/// Lessons are listed by ascending lesson number whatever order the record
/// stores them in. Fails when the lesson list cannot be decoded.
pub fn render_outline(metadata: &Metadata) -> Result<String> {
    let title = field_or(metadata, "title", "Unknown");
    let instructor = match metadata.get("instructor") {
        None => Some("Unknown".to_string()),
        Some(v) if is_truthy(v) => Some(display(v)),
        Some(_) => None,
    };
    let course_link = metadata
        .get("course_link")
        .filter(|v| is_truthy(v))
        .map(display);
    let lesson_count = field_or(metadata, "lesson_count", "0");

    let mut lessons = parse_lessons(metadata)?;
    lessons.sort_by_key(|l| l.lesson_number.unwrap_or(0));

    let mut response = format!("Course Title: {}\n", title);
    if let Some(instructor) = instructor {
        response.push_str(&format!("Instructor: {}\n", instructor));
    }
    if let Some(link) = course_link {
        response.push_str(&format!("Course Link: {}\n", link));
    }

    response.push_str(&format!("\nLessons ({} total):\n", lesson_count));
    for lesson in &lessons {
        let number = lesson
            .lesson_number
            .map_or_else(|| "Unknown".to_string(), |n| n.to_string());
        let lesson_title = lesson.lesson_title.as_deref().unwrap_or("Untitled");
        response.push_str(&format!("Lesson {}: {}\n", number, lesson_title));
    }

    Ok(response.trim().to_string())
}

fn field_or(metadata: &Metadata, key: &str, default: &str) -> String {
    metadata
        .get(key)
        .map(display)
        .unwrap_or_else(|| default.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[async_trait]
impl Tool for OutlineTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            OUTLINE_TOOL_NAME,
            "Get course outline including title, course link, and complete lesson list with numbers and titles",
        )
        .required(
            "course_name",
            "string",
            "Course title (partial matches work, e.g. 'MCP', 'Introduction')",
        )
    }

    async fn execute(&mut self, args: Value) -> String {
        match parse_args::<OutlineArgs>(OUTLINE_TOOL_NAME, args) {
            Ok(args) => self.outline(&args.course_name).await,
            Err(message) => message,
        }
    }
}
