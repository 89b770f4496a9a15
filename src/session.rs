//! Per-conversation tool session.
//!
//! Owns a [`ToolManager`] loaded with the course tools. Create one per
//! conversation and drop it with the conversation; there is no global
//! registry.

use crate::config::Settings;
use crate::error::{PensumError, Result};
use crate::store::{CourseStore, MemoryCourseStore};
use crate::tools::{OutlineTool, SearchTool, Source, ToolDefinition, ToolManager};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Text and citations produced by one tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutcome {
    pub result: String,
    pub sources: Vec<Source>,
}

/// Catalog summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStats {
    pub total_courses: usize,
    pub course_titles: Vec<String>,
}

/// Tools bound to one course store for the life of a conversation.
pub struct CourseSession {
    store: Arc<dyn CourseStore>,
    tools: ToolManager,
}

impl CourseSession {
    /// Create a session with the search and outline tools registered.
    pub fn new(store: Arc<dyn CourseStore>) -> Result<Self> {
        let mut tools = ToolManager::new();
        tools.register(SearchTool::new(store.clone()))?;
        tools.register(OutlineTool::new(store.clone()))?;
        Ok(Self { store, tools })
    }

    /// Create a session over the course library named in the settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let path = settings.library_path();
        if !path.exists() {
            return Err(PensumError::Config(format!(
                "course library not found at {}",
                path.display()
            )));
        }

        let store = MemoryCourseStore::load(&path)?.with_max_results(settings.store.max_results);
        info!("Course session ready ({})", path.display());
        Self::new(Arc::new(store))
    }

    /// The underlying tool manager.
    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    /// Mutable access to the tool manager, e.g. to register extra tools.
    pub fn tools_mut(&mut self) -> &mut ToolManager {
        &mut self.tools
    }

    /// Definitions to advertise to the model.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.tool_definitions()
    }

    /// Dispatch a tool call by name.
    pub async fn execute_tool(&mut self, name: &str, args: Value) -> String {
        self.tools.execute(name, args).await
    }

    /// Sources from the last call that produced any.
    pub fn last_sources(&self) -> &[Source] {
        self.tools.last_sources()
    }

    /// Drop recorded sources.
    pub fn reset_sources(&mut self) {
        self.tools.reset_sources();
    }

    /// Run one tool call as a self-contained turn: stale sources are reset
    /// first, and the call's sources are drained afterwards.
    pub async fn call_tool(&mut self, name: &str, args: Value) -> ToolOutcome {
        self.reset_sources();
        let result = self.execute_tool(name, args).await;
        let sources = self.last_sources().to_vec();
        self.reset_sources();
        ToolOutcome { result, sources }
    }

    /// Number and titles of catalog courses.
    pub async fn course_stats(&self) -> Result<CourseStats> {
        let course_titles = self.store.course_titles().await?;
        Ok(CourseStats {
            total_courses: course_titles.len(),
            course_titles,
        })
    }
}
