//! Tools an assistant can call to answer questions about course content.
//!
//! Every tool advertises a [`ToolDefinition`] and turns named JSON
//! arguments into a single string. Runtime failures (unknown course, empty
//! results, backend errors, bad data) come back as text the model can read,
//! never as an error. Tools that cite what they found also implement
//! [`SourceProvider`].

mod manager;
mod outline;
mod search;

pub use manager::ToolManager;
pub use outline::{render_outline, OutlineTool, OUTLINE_TOOL_NAME};
pub use search::{SearchTool, SEARCH_TOOL_NAME};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Machine-readable description of a tool for function calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// JSON Schema for a tool's arguments. Always an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

/// Schema of a single named argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
}

impl ToolDefinition {
    /// Start a definition with no arguments.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: BTreeMap::new(),
                required: Vec::new(),
            },
        }
    }

    /// Add an optional argument.
    pub fn optional(mut self, name: &str, property_type: &str, description: &str) -> Self {
        self.input_schema.properties.insert(
            name.to_string(),
            PropertySchema {
                property_type: property_type.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    /// Add a mandatory argument.
    pub fn required(self, name: &str, property_type: &str, description: &str) -> Self {
        let mut def = self.optional(name, property_type, description);
        def.input_schema.required.push(name.to_string());
        def
    }
}

/// A citation shown to the user next to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub text: String,
    pub link: Option<String>,
}

/// Capability of tools that record citations for their last call.
pub trait SourceProvider {
    /// Sources recorded by the most recent successful call.
    fn last_sources(&self) -> &[Source];

    /// Forget recorded sources.
    fn clear_sources(&mut self);
}

/// Trait for tools callable by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The definition advertised to the model. Must be stable.
    fn definition(&self) -> ToolDefinition;

    /// Run the tool with named arguments (a JSON object).
    async fn execute(&mut self, args: Value) -> String;

    /// Source tracking, for tools that support it.
    fn source_provider(&self) -> Option<&dyn SourceProvider> {
        None
    }

    /// Mutable source tracking, for tools that support it.
    fn source_provider_mut(&mut self) -> Option<&mut dyn SourceProvider> {
        None
    }
}

/// Decode named arguments, rendering failures as tool output.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments for '{}': {}", tool, e))
}

/// Strings print bare; everything else prints as JSON.
pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
