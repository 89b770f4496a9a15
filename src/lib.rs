//! Pensum - course-content tools for LLM assistants
//!
//! Lets an assistant answer questions about course material by calling
//! named tools backed by a course store.
//!
//! The name "Pensum" is the Norwegian word for "syllabus."
//!
//! # Overview
//!
//! Pensum provides:
//! - `search_course_content`: filtered search over lesson content, with
//!   citations collected on the side for display
//! - `get_course_outline`: fuzzy course lookup rendered as an ordered
//!   lesson outline
//! - A per-conversation tool manager that advertises, dispatches and
//!   resets those tools
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `store` - Course store contract and an in-memory backend
//! - `tools` - Tool trait, the course tools, and the tool manager
//! - `session` - Per-conversation tool session
//! - `mcp` - MCP server over stdio
//! - `cli` - Command-line interface and HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use pensum::session::CourseSession;
//! use pensum::store::MemoryCourseStore;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryCourseStore::load("library.json".as_ref())?;
//!     let mut session = CourseSession::new(Arc::new(store))?;
//!
//!     let text = session
//!         .execute_tool("search_course_content", json!({"query": "what is MCP?"}))
//!         .await;
//!     println!("{}", text);
//!
//!     for source in session.last_sources() {
//!         println!("{} {:?}", source.text, source.link);
//!     }
//!     session.reset_sources();
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod session;
pub mod store;
pub mod tools;

pub use error::{PensumError, Result};
