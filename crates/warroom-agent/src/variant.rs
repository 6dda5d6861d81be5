//! Shared interface for the two loop variants

use warroom_llm::Message;

/// What distinguishes one agent loop from the other.
///
/// The runner owns the state machine; a variant supplies the prompts, the
/// sentinel tool that ends research, and the turn budget.
pub trait LoopVariant: Send + Sync {
    /// Short name used in tracing spans
    fn name(&self) -> &'static str;

    /// Hard ceiling on provider turn calls
    fn max_turns(&self) -> usize;

    /// System prompt for every turn call
    fn system_prompt(&self) -> String;

    /// First user message of the conversation
    fn opening_message(&self) -> Message;

    /// Name of the tool whose invocation ends research
    fn sentinel_tool(&self) -> &'static str;

    /// Field of the sentinel's input that carries the model's summary
    fn payload_field(&self) -> &'static str;

    /// Token ceiling for the synthesis call
    fn synthesis_max_tokens(&self) -> usize;

    /// Prompt for the final tool-free synthesis call
    ///
    /// `payload` is what the model passed to the sentinel; `research` is every
    /// raw tool result collected during the run.
    fn synthesis_prompt(&self, payload: &str, research: &str) -> String;
}
