//! Tool trait definition

use serde_json::Value;

/// A named, schema-described query operation over the dataset bundle
///
/// Execution is synchronous and infallible: tools run against in-memory
/// tables, and every failure mode (bad arguments, missing tables, empty
/// filters) is reported to the model as a diagnostic string so the
/// conversation can self-correct.
pub trait Tool: Send + Sync {
    /// Tool name offered to the model; unique within a registry
    fn name(&self) -> &str;

    /// Natural-language description that tells the model when to call this
    fn description(&self) -> &str;

    /// JSON Schema for the tool's input, including defaults and enums
    fn input_schema(&self) -> Value;

    /// Execute against the dataset and return a bounded textual digest
    fn execute(&self, args: &Value) -> String;
}

/// Truncate to at most `max` characters, on a char boundary
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
