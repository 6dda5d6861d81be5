//! Decoding assistant tool-use blocks into loop actions

use serde_json::Value;
use warroom_llm::{ContentBlock, Message};

/// One tool invocation decoded from an assistant turn.
///
/// The sentinel finish tool is recognized here by name, so the runner matches
/// on a variant instead of re-comparing strings at every use site.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    /// The variant's sentinel tool: research is done, synthesize
    Finish {
        /// The payload the model passed to the sentinel (findings or
        /// talking points)
        payload: String,
    },

    /// An ordinary query tool to dispatch through the registry
    Query {
        /// Correlation id to echo back in the tool result block
        id: String,
        /// Tool name
        name: String,
        /// Tool arguments
        args: Value,
    },
}

/// Decode every tool-use block of an assistant message, in model order.
pub fn decode(message: &Message, sentinel: &str, payload_field: &str) -> Vec<ToolRequest> {
    message
        .tool_uses()
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { id, name, input } => Some(if name == sentinel {
                ToolRequest::Finish {
                    payload: input
                        .get(payload_field)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                }
            } else {
                ToolRequest::Query {
                    id: id.clone(),
                    name: name.clone(),
                    args: input.clone(),
                }
            }),
            _ => None,
        })
        .collect()
}
