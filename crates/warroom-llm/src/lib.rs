//! LLM transport layer for the earnings war room
//!
//! The orchestration loop depends on exactly two operations: a turn call
//! (conversation + tool catalog in, typed content blocks out) and a plain
//! completion call used for the synthesis step. Both go through the
//! [`LlmProvider`] trait; [`providers::AnthropicProvider`] is the concrete
//! implementation.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LlmProvider;
pub use tools::ToolDefinition;

#[cfg(feature = "anthropic")]
pub mod providers;
