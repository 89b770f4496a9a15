//! In-memory course store implementation.
//!
//! Ranks by lexical term overlap rather than embeddings. Useful for
//! testing, demos, and small course libraries.

use super::{Course, CourseChunk, CourseLibrary, CourseStore, Metadata, SearchQuery, SearchResults};
use crate::error::{PensumError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

const DEFAULT_MAX_RESULTS: usize = 5;

/// In-memory course store.
pub struct MemoryCourseStore {
    courses: Vec<Course>,
    chunks: Vec<CourseChunk>,
    max_results: usize,
}

impl MemoryCourseStore {
    /// Create a store from a course library, validating it first.
    pub fn new(library: CourseLibrary) -> Result<Self> {
        let CourseLibrary {
            mut courses,
            chunks,
        } = library;

        let mut titles = HashSet::new();
        for course in &mut courses {
            if !titles.insert(course.title.clone()) {
                return Err(PensumError::Catalog(format!(
                    "duplicate course title '{}'",
                    course.title
                )));
            }
            sanitize_links(course);
        }

        if let Some(orphan) = chunks.iter().find(|c| !titles.contains(&c.course_title)) {
            return Err(PensumError::Catalog(format!(
                "content chunk references unknown course '{}'",
                orphan.course_title
            )));
        }

        Ok(Self {
            courses,
            chunks,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Load a store from a JSON course library file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let library: CourseLibrary = serde_json::from_str(&content)?;
        let store = Self::new(library)?;
        info!(
            "Loaded {} courses and {} chunks from {}",
            store.courses.len(),
            store.chunks.len(),
            path.display()
        );
        Ok(store)
    }

    /// Set the maximum number of hits per search.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn course(&self, title: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.title == title)
    }

    /// Best-matching canonical title for a partial name.
    fn best_title(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let needle_terms = terms(&needle);

        let mut best: Option<(TitleMatch, &str)> = None;
        for course in &self.courses {
            let score = TitleMatch::score(&needle, &needle_terms, &course.title);
            if score == TitleMatch::None {
                continue;
            }
            // Strictly greater only: ties keep the earlier course.
            if best.as_ref().is_none_or(|(b, _)| score > *b) {
                best = Some((score, course.title.as_str()));
            }
        }
        best.map(|(_, title)| title)
    }
}

/// How well a partial name matches a course title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TitleMatch {
    None,
    Overlap(usize),
    Contains,
    Exact,
}

impl TitleMatch {
    fn score(needle: &str, needle_terms: &HashSet<String>, title: &str) -> Self {
        let title = title.to_lowercase();
        if title == needle {
            TitleMatch::Exact
        } else if title.contains(needle) {
            TitleMatch::Contains
        } else {
            match overlap(needle_terms, &terms(&title)) {
                0 => TitleMatch::None,
                n => TitleMatch::Overlap(n),
            }
        }
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn search(&self, query: &SearchQuery) -> SearchResults {
        let course_title = match &query.course_name {
            Some(name) => match self.best_title(name) {
                Some(title) => Some(title),
                None => return SearchResults::from_error(format!("No course found matching '{}'", name)),
            },
            None => None,
        };

        let query_terms = terms(&query.query);
        let mut scored: Vec<(usize, &CourseChunk)> = self
            .chunks
            .iter()
            .filter(|c| course_title.is_none_or(|t| c.course_title == t))
            .filter(|c| query.lesson_number.is_none_or(|n| c.lesson_number == Some(n)))
            .map(|c| (overlap(&query_terms, &terms(&c.content)), c))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable sort: equal scores stay in library order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(self.max_results);

        debug!(
            "Search '{}' matched {} chunks (course={:?}, lesson={:?})",
            query.query,
            scored.len(),
            course_title,
            query.lesson_number
        );

        SearchResults::from_hits(
            scored
                .into_iter()
                .map(|(_, chunk)| (chunk.content.clone(), chunk.metadata())),
        )
    }

    async fn resolve_course_name(&self, name: &str) -> Result<Option<String>> {
        Ok(self.best_title(name).map(str::to_string))
    }

    async fn get_lesson_link(
        &self,
        course_title: &str,
        lesson_number: i64,
    ) -> Result<Option<String>> {
        Ok(self
            .course(course_title)
            .and_then(|c| c.lesson(lesson_number))
            .and_then(|l| l.lesson_link.clone()))
    }

    async fn course_metadata(&self, course_title: &str) -> Result<Option<Metadata>> {
        self.course(course_title).map(Course::to_metadata).transpose()
    }

    async fn course_titles(&self) -> Result<Vec<String>> {
        Ok(self.courses.iter().map(|c| c.title.clone()).collect())
    }
}

/// Drop course and lesson links that are not absolute URLs.
fn sanitize_links(course: &mut Course) {
    if let Some(link) = &course.course_link {
        if url::Url::parse(link).is_err() {
            warn!("Dropping invalid course link for '{}': {}", course.title, link);
            course.course_link = None;
        }
    }
    for lesson in &mut course.lessons {
        if let Some(link) = &lesson.lesson_link {
            if url::Url::parse(link).is_err() {
                warn!(
                    "Dropping invalid link for '{}' lesson {}: {}",
                    course.title, lesson.lesson_number, link
                );
                lesson.lesson_link = None;
            }
        }
    }
}

/// Lowercased alphanumeric terms of a text.
fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}
