//! Events emitted by a running agent loop

use serde::Serialize;
use serde_json::Value;

/// Progress and terminal events streamed to the caller.
///
/// Every run ends with exactly one terminal event: `Complete` (the model
/// answered in plain text without finishing through its sentinel tool),
/// `FinalResult` (synthesized output after the sentinel fired), or `Error`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// The model requested a tool invocation
    ToolCall {
        /// Tool name
        name: String,
        /// Tool input as given by the model
        input: Value,
    },

    /// A tool finished; carries a display preview, not the full result
    ToolResult {
        /// Result text truncated for display
        preview: String,
    },

    /// The model stopped without calling its sentinel tool
    Complete {
        /// Concatenated assistant text
        content: String,
    },

    /// Synthesized final output after the sentinel tool fired
    FinalResult {
        /// Final questions or defense brief
        content: String,
    },

    /// Terminal failure (transport error or turn budget exhausted)
    Error {
        /// Human-readable message
        message: String,
    },
}
