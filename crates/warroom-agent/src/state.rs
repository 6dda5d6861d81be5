//! Loop-local conversation state

use warroom_llm::Message;

/// Conversation history plus everything the tools returned so far.
///
/// Owned by the running loop and dropped with it; nothing here survives the
/// run, so an abandoned loop leaves no partial state behind.
#[derive(Debug)]
pub struct ConversationState {
    /// Alternating user/assistant messages sent to the provider
    pub messages: Vec<Message>,

    /// Zero-based turn counter
    pub turn: usize,

    /// Hard ceiling on provider turn calls
    pub max_turns: usize,

    /// Full, untruncated tool results as `(tool name, result)` pairs
    collected: Vec<(String, String)>,
}

impl ConversationState {
    /// Start a fresh conversation from the variant's opening message.
    pub fn new(opening: Message, max_turns: usize) -> Self {
        Self {
            messages: vec![opening],
            turn: 0,
            max_turns,
            collected: Vec::new(),
        }
    }

    /// Record one tool's full result for later synthesis.
    pub fn record(&mut self, tool_name: &str, result: &str) {
        self.collected.push((tool_name.to_string(), result.to_string()));
    }

    /// Everything the tools returned, formatted for the synthesis prompt.
    ///
    /// Each entry reads `[tool_name]:` followed by the untruncated result;
    /// entries are separated by a blank line.
    pub fn research_context(&self) -> String {
        self.collected
            .iter()
            .map(|(name, result)| format!("[{name}]:\n{result}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
