//! Tool catalog entry sent to the LLM

use serde::{Deserialize, Serialize};

/// Declared schema for one tool the model may call
///
/// This is the advertisement only: name, natural-language description and a
/// JSON Schema for the input. Execution lives in the dispatch registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the name used at dispatch)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}
