//! Course catalog records and the JSON course library format.

use super::Metadata;
use crate::error::{PensumError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A lesson within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_number: i64,
    pub title: String,
    #[serde(default)]
    pub lesson_link: Option<String>,
}

/// A course as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Canonical title, unique across the catalog.
    pub title: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub course_link: Option<String>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Render this course as a catalog metadata record.
    ///
    /// The lesson list is stored JSON-encoded under `lessons_json`.
    pub fn to_metadata(&self) -> Result<Metadata> {
        let lessons: Vec<CatalogLesson> = self
            .lessons
            .iter()
            .map(|l| CatalogLesson {
                lesson_number: Some(l.lesson_number),
                lesson_title: Some(l.title.clone()),
                lesson_link: l.lesson_link.clone(),
            })
            .collect();

        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!(self.title));
        metadata.insert("instructor".to_string(), json!(self.instructor));
        metadata.insert("course_link".to_string(), json!(self.course_link));
        metadata.insert("lesson_count".to_string(), json!(self.lessons.len()));
        metadata.insert(
            "lessons_json".to_string(),
            Value::String(serde_json::to_string(&lessons)?),
        );
        Ok(metadata)
    }

    /// Find a lesson by number.
    pub fn lesson(&self, lesson_number: i64) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.lesson_number == lesson_number)
    }
}

/// A chunk of lesson content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseChunk {
    pub course_title: String,
    #[serde(default)]
    pub lesson_number: Option<i64>,
    pub content: String,
}

impl CourseChunk {
    /// Per-hit metadata for this chunk.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("course_title".to_string(), json!(self.course_title));
        if let Some(n) = self.lesson_number {
            metadata.insert("lesson_number".to_string(), json!(n));
        }
        metadata
    }
}

/// On-disk course library: catalog plus content chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseLibrary {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub chunks: Vec<CourseChunk>,
}

/// One entry of the `lessons_json` list in a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogLesson {
    #[serde(default)]
    pub lesson_number: Option<i64>,
    #[serde(default)]
    pub lesson_title: Option<String>,
    #[serde(default)]
    pub lesson_link: Option<String>,
}

/// Decode the lesson list of a catalog record.
///
/// A missing `lessons_json` means no lessons. Anything present that is not
/// a JSON string holding a list of lessons is a data-integrity error.
pub fn parse_lessons(metadata: &Metadata) -> Result<Vec<CatalogLesson>> {
    match metadata.get("lessons_json") {
        None => Ok(Vec::new()),
        Some(Value::String(raw)) => Ok(serde_json::from_str(raw)?),
        Some(other) => Err(PensumError::Catalog(format!(
            "lessons_json must be a JSON-encoded string, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            title: "MCP Basics".to_string(),
            instructor: Some("Ada".to_string()),
            course_link: Some("https://example.com/mcp".to_string()),
            lessons: vec![
                Lesson {
                    lesson_number: 2,
                    title: "Servers".to_string(),
                    lesson_link: Some("https://example.com/mcp/2".to_string()),
                },
                Lesson {
                    lesson_number: 1,
                    title: "Intro".to_string(),
                    lesson_link: None,
                },
            ],
        }
    }

    #[test]
    fn test_metadata_encodes_lessons() {
        let metadata = course().to_metadata().unwrap();
        assert_eq!(metadata["title"], json!("MCP Basics"));
        assert_eq!(metadata["lesson_count"], json!(2));

        let lessons = parse_lessons(&metadata).unwrap();
        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].lesson_number, Some(2));
        assert_eq!(lessons[0].lesson_title.as_deref(), Some("Servers"));
        assert_eq!(lessons[1].lesson_link, None);
    }

    #[test]
    fn test_parse_lessons_missing_is_empty() {
        assert!(parse_lessons(&Metadata::new()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_lessons_rejects_malformed() {
        let mut metadata = Metadata::new();
        metadata.insert("lessons_json".to_string(), json!("[{not json"));
        assert!(parse_lessons(&metadata).is_err());

        metadata.insert("lessons_json".to_string(), json!(42));
        assert!(matches!(parse_lessons(&metadata), Err(PensumError::Catalog(_))));
    }

    #[test]
    fn test_chunk_metadata_omits_missing_lesson() {
        let chunk = CourseChunk {
            course_title: "MCP Basics".to_string(),
            lesson_number: None,
            content: "overview".to_string(),
        };
        let metadata = chunk.metadata();
        assert_eq!(metadata["course_title"], json!("MCP Basics"));
        assert!(!metadata.contains_key("lesson_number"));
    }
}
