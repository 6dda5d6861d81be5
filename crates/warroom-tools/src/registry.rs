//! Registry mapping tool names to bound executors

use crate::tool::Tool;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use warroom_llm::ToolDefinition;

/// Catalog of tools offered to the model for one loop variant
///
/// Registration order is preserved so the catalog the model sees is stable
/// across runs.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; replaces any earlier tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Build the tool catalog to send to the model
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Dispatch one invocation by name
    ///
    /// An unrecognized name yields a diagnostic string rather than an error,
    /// so the loop can hand it back to the model as a tool result.
    pub fn execute(&self, name: &str, args: &Value) -> String {
        match self.get(name) {
            Some(tool) => {
                debug!(tool = name, "executing tool");
                tool.execute(args)
            }
            None => format!("Unknown tool: {name}"),
        }
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
