//! Registry and dispatcher for tools.

use super::{Source, Tool, ToolDefinition};
use crate::error::{PensumError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Name-keyed registry of tools, kept in registration order.
///
/// One manager belongs to one conversation. Calls take `&mut self`, so
/// concurrent callers have to serialize access themselves.
#[derive(Default)]
pub struct ToolManager {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolManager {
    /// Creates a new empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under the name in its definition.
    ///
    /// A tool registered under an existing name replaces the old one in
    /// place. Fails only when the definition has no name.
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<()> {
        self.register_boxed(Box::new(tool))
    }

    /// Registers an already boxed tool.
    pub fn register_boxed(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        let name = tool.definition().name;
        if name.is_empty() {
            return Err(PensumError::Config(
                "Tool must have a 'name' in its definition".to_string(),
            ));
        }

        match self.index.get(&name) {
            Some(&slot) => {
                warn!("Replacing previously registered tool '{}'", name);
                self.tools[slot] = tool;
            }
            None => {
                info!("Registered tool '{}'", name);
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
        Ok(())
    }

    /// Definitions of all registered tools, in registration order.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Runs a tool by name. Unknown names produce a message, not an error.
    pub async fn execute(&mut self, name: &str, args: Value) -> String {
        let Some(&slot) = self.index.get(name) else {
            debug!("Tool '{}' not found", name);
            return format!("Tool '{}' not found", name);
        };

        debug!("Executing tool '{}'", name);
        self.tools[slot].execute(args).await
    }

    /// Sources from the first source-tracking tool that has any.
    pub fn last_sources(&self) -> &[Source] {
        self.tools
            .iter()
            .filter_map(|t| t.source_provider())
            .map(|p| p.last_sources())
            .find(|sources| !sources.is_empty())
            .unwrap_or(&[])
    }

    /// Clears sources on every source-tracking tool.
    pub fn reset_sources(&mut self) {
        for tool in &mut self.tools {
            if let Some(provider) = tool.source_provider_mut() {
                provider.clear_sources();
            }
        }
    }

    /// Whether a tool is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names of registered tools, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_definitions().into_iter().map(|d| d.name).collect()
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolManager")
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::SourceProvider;
    use async_trait::async_trait;
    use serde_json::json;

    /// Tool that echoes its arguments under a fixed name.
    struct Echo {
        name: &'static str,
        tag: &'static str,
    }

    #[async_trait]
    impl Tool for Echo {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new(self.name, "Echo arguments").required("text", "string", "Text")
        }

        async fn execute(&mut self, args: Value) -> String {
            format!("{}:{}", self.tag, args["text"].as_str().unwrap_or_default())
        }
    }

    /// Tool that cites whatever it is asked to.
    struct Citer {
        name: &'static str,
        sources: Vec<Source>,
    }

    impl Citer {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                sources: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Tool for Citer {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new(self.name, "Cite things").required("cite", "string", "Citation")
        }

        async fn execute(&mut self, args: Value) -> String {
            let text = args["cite"].as_str().unwrap_or_default().to_string();
            self.sources = vec![Source {
                text: text.clone(),
                link: None,
            }];
            text
        }

        fn source_provider(&self) -> Option<&dyn SourceProvider> {
            Some(self)
        }

        fn source_provider_mut(&mut self) -> Option<&mut dyn SourceProvider> {
            Some(self)
        }
    }

    impl SourceProvider for Citer {
        fn last_sources(&self) -> &[Source] {
            &self.sources
        }

        fn clear_sources(&mut self) {
            self.sources.clear();
        }
    }

    #[test]
    fn test_register_rejects_nameless_tool() {
        let mut manager = ToolManager::new();
        let err = manager.register(Echo { name: "", tag: "x" }).unwrap_err();
        assert!(matches!(err, PensumError::Config(_)));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_definitions_follow_registration_order() {
        let mut manager = ToolManager::new();
        manager.register(Echo { name: "zeta", tag: "z" }).unwrap();
        manager.register(Echo { name: "alpha", tag: "a" }).unwrap();
        manager.register(Citer::new("mid")).unwrap();

        assert_eq!(manager.tool_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(manager.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_name_replaces_in_place() {
        let mut manager = ToolManager::new();
        manager.register(Echo { name: "echo", tag: "old" }).unwrap();
        manager.register(Echo { name: "other", tag: "o" }).unwrap();
        manager.register(Echo { name: "echo", tag: "new" }).unwrap();

        assert_eq!(manager.tool_names(), vec!["echo", "other"]);
        assert_eq!(manager.execute("echo", json!({"text": "hi"})).await, "new:hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_message() {
        let mut manager = ToolManager::new();
        manager.register(Echo { name: "echo", tag: "e" }).unwrap();

        assert_eq!(
            manager.execute("nonexistent", json!({})).await,
            "Tool 'nonexistent' not found"
        );
        assert!(!manager.contains("nonexistent"));
    }

    #[tokio::test]
    async fn test_last_sources_first_non_empty_in_order() {
        let mut manager = ToolManager::new();
        manager.register(Echo { name: "echo", tag: "e" }).unwrap();
        manager.register(Citer::new("first")).unwrap();
        manager.register(Citer::new("second")).unwrap();

        assert!(manager.last_sources().is_empty());

        manager.execute("second", json!({"cite": "B"})).await;
        assert_eq!(manager.last_sources()[0].text, "B");

        manager.execute("first", json!({"cite": "A"})).await;
        assert_eq!(manager.last_sources()[0].text, "A");
        assert_eq!(manager.last_sources(), manager.last_sources());
    }

    #[tokio::test]
    async fn test_reset_clears_every_provider() {
        let mut manager = ToolManager::new();
        manager.register(Citer::new("first")).unwrap();
        manager.register(Citer::new("second")).unwrap();

        manager.execute("first", json!({"cite": "A"})).await;
        manager.execute("second", json!({"cite": "B"})).await;
        manager.reset_sources();

        assert!(manager.last_sources().is_empty());
        manager.execute("second", json!({"cite": "C"})).await;
        assert_eq!(manager.last_sources()[0].text, "C");
    }
}
