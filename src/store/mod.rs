//! Course store abstraction for Pensum.
//!
//! The tools never talk to an index directly. They go through
//! [`CourseStore`], which owns course-name resolution, filtered search,
//! and the course catalog.

mod catalog;
mod memory;

pub use catalog::{parse_lessons, CatalogLesson, Course, CourseChunk, CourseLibrary, Lesson};
pub use memory::MemoryCourseStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form metadata attached to a search hit or catalog record.
pub type Metadata = serde_json::Map<String, Value>;

/// A filtered semantic search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// What to search for.
    pub query: String,
    /// Partial or approximate course title to restrict the search to.
    #[serde(default)]
    pub course_name: Option<String>,
    /// Lesson number to restrict the search to.
    #[serde(default)]
    pub lesson_number: Option<i64>,
}

impl SearchQuery {
    /// Create an unfiltered query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restrict the query to a course.
    pub fn in_course(mut self, course_name: impl Into<String>) -> Self {
        self.course_name = Some(course_name.into());
        self
    }

    /// Restrict the query to a lesson.
    pub fn in_lesson(mut self, lesson_number: i64) -> Self {
        self.lesson_number = Some(lesson_number);
        self
    }
}

/// Ranked hits returned by [`CourseStore::search`].
///
/// `documents` and `metadata` are aligned one to one. When `error` is set
/// the other fields carry no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub metadata: Vec<Metadata>,
    pub error: Option<String>,
}

impl SearchResults {
    /// Build results from aligned (document, metadata) hits.
    pub fn from_hits(hits: impl IntoIterator<Item = (String, Metadata)>) -> Self {
        let (documents, metadata) = hits.into_iter().unzip();
        Self {
            documents,
            metadata,
            error: None,
        }
    }

    /// Results with no hits and no error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Results carrying only an error message.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Whether there are no hits.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Trait for course store implementations.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Run a filtered search. Backend failures are reported through
    /// [`SearchResults::error`], never as a Rust error.
    async fn search(&self, query: &SearchQuery) -> SearchResults;

    /// Map a partial course name to exactly one canonical title.
    async fn resolve_course_name(&self, name: &str) -> Result<Option<String>>;

    /// Look up the URL of a lesson.
    async fn get_lesson_link(&self, course_title: &str, lesson_number: i64)
        -> Result<Option<String>>;

    /// Fetch the catalog record for a canonical course title.
    async fn course_metadata(&self, course_title: &str) -> Result<Option<Metadata>>;

    /// All canonical course titles in the catalog.
    async fn course_titles(&self) -> Result<Vec<String>>;
}
