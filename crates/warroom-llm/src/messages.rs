//! Message types for LLM communication
//!
//! Conversations are sequences of role-tagged messages whose content is either
//! plain text or structured blocks (text, tool invocations, tool results),
//! following Anthropic's Messages API shape.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message (includes tool results)
    User,
    /// Assistant message
    Assistant,
}

/// Content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Tool invocation requested by the assistant
    ToolUse {
        /// Correlation identifier for this invocation
        id: String,
        /// Tool name
        name: String,
        /// Tool input parameters (JSON)
        input: serde_json::Value,
    },

    /// Tool result sent back by the caller
    ToolResult {
        /// Correlation identifier of the invocation this answers
        tool_use_id: String,
        /// Result content
        content: String,
        /// Whether this result is an error
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create one user message bundling every tool result from a turn
    ///
    /// All results from the same assistant turn travel together in a single
    /// follow-up message, each tagged with its correlation identifier.
    pub fn tool_results(results: Vec<(String, String)>) -> Self {
        let blocks = results
            .into_iter()
            .map(|(tool_use_id, content)| ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error: None,
            })
            .collect();
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(blocks)),
        }
    }

    /// Concatenate all text content in the message
    pub fn text(&self) -> String {
        match &self.content {
            Some(MessageContent::Text(s)) => s.clone(),
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
            None => String::new(),
        }
    }

    /// Tool invocations requested in this message, in the order produced
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
                .collect(),
            _ => vec![],
        }
    }

    /// Check if this message contains any tool invocations
    pub fn has_tool_uses(&self) -> bool {
        !self.tool_uses().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), "Hello");
    }

    #[test]
    fn test_assistant_message() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.text(), "Hi there");
    }

    #[test]
    fn test_tool_results_bundled_into_one_message() {
        let msg = Message::tool_results(vec![
            ("toolu_1".to_string(), "first".to_string()),
            ("toolu_2".to_string(), "second".to_string()),
        ]);
        assert_eq!(msg.role, Role::User);
        match &msg.content {
            Some(MessageContent::Blocks(blocks)) => assert_eq!(blocks.len(), 2),
            _ => panic!("expected blocks"),
        }
        assert!(!msg.has_tool_uses());
    }

    #[test]
    fn test_tool_uses_preserve_order() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::ToolUse {
                    id: "a".to_string(),
                    name: "first_tool".to_string(),
                    input: json!({}),
                },
                ContentBlock::Text {
                    text: "thinking".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "b".to_string(),
                    name: "second_tool".to_string(),
                    input: json!({}),
                },
            ])),
        };

        let uses = msg.tool_uses();
        assert_eq!(uses.len(), 2);
        match uses[0] {
            ContentBlock::ToolUse { name, .. } => assert_eq!(name, "first_tool"),
            _ => panic!("expected tool use"),
        }
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Test");
        let json = serde_json::to_string(&msg).expect("serialize");
        let deserialized: Message = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(deserialized.text(), "Test");
    }

    #[test]
    fn test_text_concatenates_blocks() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::Text {
                    text: "one".to_string(),
                },
                ContentBlock::Text {
                    text: "two".to_string(),
                },
            ])),
        };
        assert_eq!(msg.text(), "one\ntwo");
    }
}
