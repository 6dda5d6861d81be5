//! The bounded tool-calling loop shared by both variants

use crate::dispatch::{self, ToolRequest};
use crate::events::AgentEvent;
use crate::state::ConversationState;
use crate::variant::LoopVariant;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;
use warroom_llm::{CompletionRequest, LlmProvider, Message};
use warroom_tools::ToolRegistry;

/// Token ceiling for each research turn
const TURN_MAX_TOKENS: usize = 4000;

/// Display previews of tool results are cut at this many characters
const PREVIEW_CHARS: usize = 500;

/// Drives one research conversation to a terminal event.
///
/// The loop never panics and never returns an error: transport failures and
/// an exhausted turn budget both surface as [`AgentEvent::Error`].
pub struct AgentLoop<V: LoopVariant> {
    variant: V,
    provider: Arc<dyn LlmProvider>,
    registry: ToolRegistry,
    model: String,
}

impl<V: LoopVariant> AgentLoop<V> {
    pub fn new(
        variant: V,
        provider: Arc<dyn LlmProvider>,
        registry: ToolRegistry,
        model: impl Into<String>,
    ) -> Self {
        Self {
            variant,
            provider,
            registry,
            model: model.into(),
        }
    }

    /// Run to completion, streaming events over `tx`.
    ///
    /// Send failures are ignored: a dropped receiver just means nobody is
    /// watching anymore, and the loop finishes its current turn regardless.
    pub async fn run(self, tx: UnboundedSender<AgentEvent>) {
        let run_id = Uuid::new_v4();
        let span = info_span!("agent_run", variant = self.variant.name(), %run_id);
        self.run_inner(tx).instrument(span).await;
    }

    async fn run_inner(self, tx: UnboundedSender<AgentEvent>) {
        let system = self.variant.system_prompt();
        let tools = self.registry.definitions();
        let mut state =
            ConversationState::new(self.variant.opening_message(), self.variant.max_turns());

        for turn in 0..state.max_turns {
            state.turn = turn;
            debug!(turn, "requesting completion");

            let request = CompletionRequest::builder(&self.model)
                .system(system.clone())
                .max_tokens(TURN_MAX_TOKENS)
                .tools(tools.clone())
                .messages(state.messages.clone())
                .build();

            let response = match self.provider.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(turn, error = %e, "turn call failed");
                    let _ = tx.send(AgentEvent::Error {
                        message: e.to_string(),
                    });
                    return;
                }
            };

            let assistant = response.message;
            state.messages.push(assistant.clone());

            let requests = dispatch::decode(
                &assistant,
                self.variant.sentinel_tool(),
                self.variant.payload_field(),
            );

            if requests.is_empty() {
                info!(turn, "model stopped without sentinel");
                let _ = tx.send(AgentEvent::Complete {
                    content: assistant.text(),
                });
                return;
            }

            let mut results: Vec<(String, String)> = Vec::new();
            for request in requests {
                match request {
                    ToolRequest::Finish { payload } => {
                        let _ = tx.send(AgentEvent::ToolCall {
                            name: self.variant.sentinel_tool().to_string(),
                            input: json!({ self.variant.payload_field(): payload }),
                        });
                        self.synthesize(&payload, &state, &tx).await;
                        return;
                    }
                    ToolRequest::Query { id, name, args } => {
                        let _ = tx.send(AgentEvent::ToolCall {
                            name: name.clone(),
                            input: args.clone(),
                        });

                        let result = self.registry.execute(&name, &args);
                        debug!(tool = %name, result_chars = result.chars().count(), "tool executed");

                        let _ = tx.send(AgentEvent::ToolResult {
                            preview: preview(&result),
                        });
                        state.record(&name, &result);
                        results.push((id, result));
                    }
                }
            }

            state.messages.push(Message::tool_results(results));
        }

        warn!(max_turns = state.max_turns, "turn budget exhausted");
        let _ = tx.send(AgentEvent::Error {
            message: "Max turns reached".to_string(),
        });
    }

    /// One tool-free completion over the sentinel payload and every raw tool
    /// result collected so far.
    async fn synthesize(
        &self,
        payload: &str,
        state: &ConversationState,
        tx: &UnboundedSender<AgentEvent>,
    ) {
        let prompt = self
            .variant
            .synthesis_prompt(payload, &state.research_context());
        let request =
            CompletionRequest::plain(&self.model, prompt, self.variant.synthesis_max_tokens());

        match self.provider.complete(request).await {
            Ok(response) => {
                info!("synthesis complete");
                let _ = tx.send(AgentEvent::FinalResult {
                    content: response.message.text(),
                });
            }
            Err(e) => {
                warn!(error = %e, "synthesis call failed");
                let _ = tx.send(AgentEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Ellipsised display preview; the full result still reaches the model.
fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionVariant;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;
    use warroom_llm::{
        CompletionResponse, ContentBlock, LlmError, MessageContent, Role, StopReason, TokenUsage,
    };
    use warroom_tools::Tool;

    /// Provider that replays a fixed script of responses.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<CompletionResponse>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<CompletionResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> warroom_llm::Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .expect("lock poisoned")
                .pop_front()
                .ok_or_else(|| LlmError::UnexpectedResponse("script exhausted".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "echoes its input"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        fn execute(&self, args: &Value) -> String {
            args.to_string()
        }
    }

    fn assistant_blocks(blocks: Vec<ContentBlock>) -> CompletionResponse {
        CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Blocks(blocks)),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 10,
            },
        }
    }

    fn assistant_text(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 10,
            },
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::default();
        registry.register(Arc::new(EchoTool));
        registry
    }

    async fn drain(mut rx: mpsc::UnboundedReceiver<AgentEvent>) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_first_turn_sentinel_triggers_one_synthesis() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            assistant_blocks(vec![ContentBlock::ToolUse {
                id: "toolu_1".to_string(),
                name: "generate_questions".to_string(),
                input: json!({"findings": "FCF is weak"}),
            }]),
            assistant_text("QUESTION: Why is FCF weak?"),
        ]));

        let (tx, rx) = mpsc::unbounded_channel();
        AgentLoop::new(
            QuestionVariant::new("Snowflake"),
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            registry(),
            "test-model",
        )
        .run(tx)
        .await;

        // One turn call plus one synthesis call, nothing after
        assert_eq!(provider.calls(), 2);

        let events = drain(rx).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AgentEvent::ToolCall { name, .. } if name == "generate_questions"));
        assert!(
            matches!(&events[1], AgentEvent::FinalResult { content } if content.contains("Why is FCF weak?"))
        );
    }

    #[tokio::test]
    async fn test_query_then_sentinel_collects_research() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            assistant_blocks(vec![ContentBlock::ToolUse {
                id: "toolu_1".to_string(),
                name: "echo".to_string(),
                input: json!({"k": "v"}),
            }]),
            assistant_blocks(vec![ContentBlock::ToolUse {
                id: "toolu_2".to_string(),
                name: "generate_questions".to_string(),
                input: json!({"findings": "done"}),
            }]),
            assistant_text("QUESTION: Q?"),
        ]));

        let (tx, rx) = mpsc::unbounded_channel();
        AgentLoop::new(
            QuestionVariant::new("Snowflake"),
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            registry(),
            "test-model",
        )
        .run(tx)
        .await;

        assert_eq!(provider.calls(), 3);

        let events = drain(rx).await;
        assert!(matches!(&events[0], AgentEvent::ToolCall { name, .. } if name == "echo"));
        assert!(
            matches!(&events[1], AgentEvent::ToolResult { preview } if preview.contains("\"k\":\"v\""))
        );
        assert!(matches!(events.last(), Some(AgentEvent::FinalResult { .. })));
    }

    #[tokio::test]
    async fn test_zero_tool_calls_completes() {
        let provider = Arc::new(ScriptedProvider::new(vec![assistant_text(
            "I already know enough.",
        )]));

        let (tx, rx) = mpsc::unbounded_channel();
        AgentLoop::new(
            QuestionVariant::new("Snowflake"),
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            registry(),
            "test-model",
        )
        .run(tx)
        .await;

        assert_eq!(provider.calls(), 1);
        let events = drain(rx).await;
        assert_eq!(events.len(), 1);
        assert!(
            matches!(&events[0], AgentEvent::Complete { content } if content == "I already know enough.")
        );
    }

    #[tokio::test]
    async fn test_turn_budget_exhaustion_errors_without_synthesis() {
        let tool_turn = || {
            assistant_blocks(vec![ContentBlock::ToolUse {
                id: "toolu".to_string(),
                name: "echo".to_string(),
                input: json!({}),
            }])
        };
        // More scripted turns than the budget allows
        let provider = Arc::new(ScriptedProvider::new((0..8).map(|_| tool_turn()).collect()));

        let (tx, rx) = mpsc::unbounded_channel();
        AgentLoop::new(
            QuestionVariant::new("Snowflake"),
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            registry(),
            "test-model",
        )
        .run(tx)
        .await;

        // Exactly max_turns calls, never more
        assert_eq!(provider.calls(), 5);

        let events = drain(rx).await;
        assert!(
            matches!(events.last(), Some(AgentEvent::Error { message }) if message == "Max turns reached")
        );
        assert!(!events.iter().any(|e| matches!(e, AgentEvent::FinalResult { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_event() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));

        let (tx, rx) = mpsc::unbounded_channel();
        AgentLoop::new(
            QuestionVariant::new("Snowflake"),
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            registry(),
            "test-model",
        )
        .run(tx)
        .await;

        let events = drain(rx).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], AgentEvent::Error { .. }));
    }

    #[tokio::test]
    async fn test_sentinel_discards_rest_of_batch() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            assistant_blocks(vec![
                ContentBlock::ToolUse {
                    id: "toolu_1".to_string(),
                    name: "generate_questions".to_string(),
                    input: json!({"findings": "enough"}),
                },
                ContentBlock::ToolUse {
                    id: "toolu_2".to_string(),
                    name: "echo".to_string(),
                    input: json!({"never": "runs"}),
                },
            ]),
            assistant_text("QUESTION: Q?"),
        ]));

        let (tx, rx) = mpsc::unbounded_channel();
        AgentLoop::new(
            QuestionVariant::new("Snowflake"),
            Arc::clone(&provider) as Arc<dyn LlmProvider>,
            registry(),
            "test-model",
        )
        .run(tx)
        .await;

        let events = drain(rx).await;
        // The trailing echo call is never dispatched
        assert!(!events.iter().any(
            |e| matches!(e, AgentEvent::ToolCall { name, .. } if name == "echo")
        ));
        assert!(matches!(events.last(), Some(AgentEvent::FinalResult { .. })));
    }

    #[test]
    fn test_preview_truncation() {
        let short = "x".repeat(500);
        assert_eq!(preview(&short), short);

        let long = "x".repeat(501);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 503);
        assert!(p.ends_with("..."));
    }
}
