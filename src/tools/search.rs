//! Course content search tool.

use super::{display, parse_args, Source, SourceProvider, Tool, ToolDefinition};
use crate::store::{CourseStore, Metadata, SearchQuery, SearchResults};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Name advertised for [`SearchTool`].
pub const SEARCH_TOOL_NAME: &str = "search_course_content";

/// Searches course content with optional course and lesson filters.
///
/// Hits are rendered as `[<course> - Lesson <n>]` headed blocks; the
/// matching citations are kept until the next successful search or until
/// they are cleared.
pub struct SearchTool {
    store: Arc<dyn CourseStore>,
    last_sources: Vec<Source>,
}

impl SearchTool {
    /// Create a search tool over a course store.
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self {
            store,
            last_sources: Vec::new(),
        }
    }

    /// Run a search and format the hits for the model.
    #[instrument(skip(self, query), fields(query = %query.query))]
    pub async fn search(&mut self, query: &SearchQuery) -> String {
        let results = self.store.search(query).await;

        if let Some(error) = results.error {
            debug!("Store reported error: {}", error);
            return error;
        }

        if results.is_empty() {
            return no_content_message(query);
        }

        self.format_results(&results).await
    }

    async fn format_results(&mut self, results: &SearchResults) -> String {
        let mut formatted = Vec::with_capacity(results.len());
        let mut sources = Vec::with_capacity(results.len());

        for (doc, meta) in results.documents.iter().zip(&results.metadata) {
            let course_title = present(meta, "course_title")
                .map(display)
                .unwrap_or_else(|| "unknown".to_string());
            let lesson = lesson_of(meta);

            let label = match &lesson {
                Some(lesson) => format!("{} - Lesson {}", course_title, lesson.text),
                None => course_title.clone(),
            };

            let link = match lesson.and_then(|l| l.number) {
                Some(n) => self.lesson_link(&course_title, n).await,
                None => None,
            };

            formatted.push(format!("[{}]\n{}", label, doc));
            sources.push(Source { text: label, link });
        }

        debug!("Formatted {} hits", sources.len());
        self.last_sources = sources;

        formatted.join("\n\n")
    }

    async fn lesson_link(&self, course_title: &str, lesson_number: i64) -> Option<String> {
        match self.store.get_lesson_link(course_title, lesson_number).await {
            Ok(link) => link,
            Err(e) => {
                warn!("Error getting lesson link: {}", e);
                None
            }
        }
    }
}

/// A hit's lesson as shown in its label, and as a number when it has one.
struct HitLesson {
    text: String,
    number: Option<i64>,
}

fn present<'a>(meta: &'a Metadata, key: &str) -> Option<&'a Value> {
    meta.get(key).filter(|v| !v.is_null())
}

/// Integral numbers and numeric strings are normalized; any other value
/// is labelled as-is and gets no link lookup.
fn lesson_of(meta: &Metadata) -> Option<HitLesson> {
    let value = present(meta, "lesson_number")?;
    let number = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let text = number.map_or_else(|| display(value), |n| n.to_string());
    Some(HitLesson { text, number })
}

/// Message for an empty result set, echoing the active filters.
fn no_content_message(query: &SearchQuery) -> String {
    let mut filter_info = String::new();
    if let Some(course) = &query.course_name {
        filter_info.push_str(&format!(" in course '{}'", course));
    }
    if let Some(lesson) = query.lesson_number {
        filter_info.push_str(&format!(" in lesson {}", lesson));
    }
    format!("No relevant content found{}.", filter_info)
}

#[async_trait]
impl Tool for SearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            SEARCH_TOOL_NAME,
            "Search course materials with smart course name matching and lesson filtering",
        )
        .required("query", "string", "What to search for in the course content")
        .optional(
            "course_name",
            "string",
            "Course title (partial matches work, e.g. 'MCP', 'Introduction')",
        )
        .optional(
            "lesson_number",
            "integer",
            "Specific lesson number to search within (e.g. 1, 2, 3)",
        )
    }

    async fn execute(&mut self, args: Value) -> String {
        match parse_args::<SearchQuery>(SEARCH_TOOL_NAME, args) {
            Ok(query) => self.search(&query).await,
            Err(message) => message,
        }
    }

    fn source_provider(&self) -> Option<&dyn SourceProvider> {
        Some(self)
    }

    fn source_provider_mut(&mut self) -> Option<&mut dyn SourceProvider> {
        Some(self)
    }
}

impl SourceProvider for SearchTool {
    fn last_sources(&self) -> &[Source] {
        &self.last_sources
    }

    fn clear_sources(&mut self) {
        self.last_sources.clear();
    }
}
