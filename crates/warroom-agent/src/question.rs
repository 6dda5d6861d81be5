//! Loop variant that anticipates tough analyst questions

use crate::prompts;
use crate::variant::LoopVariant;
use warroom_llm::Message;
use warroom_tools::GENERATE_QUESTIONS;

const MAX_TURNS: usize = 5;
const SYNTHESIS_MAX_TOKENS: usize = 2000;

/// Researches the full dataset and synthesizes five analyst questions in the
/// structured wire format.
pub struct QuestionVariant {
    company: String,
}

impl QuestionVariant {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
        }
    }
}

impl LoopVariant for QuestionVariant {
    fn name(&self) -> &'static str {
        "questions"
    }

    fn max_turns(&self) -> usize {
        MAX_TURNS
    }

    fn system_prompt(&self) -> String {
        prompts::question_system(&self.company)
    }

    fn opening_message(&self) -> Message {
        Message::user(prompts::question_opening(&self.company))
    }

    fn sentinel_tool(&self) -> &'static str {
        GENERATE_QUESTIONS
    }

    fn payload_field(&self) -> &'static str {
        "findings"
    }

    fn synthesis_max_tokens(&self) -> usize {
        SYNTHESIS_MAX_TOKENS
    }

    fn synthesis_prompt(&self, payload: &str, research: &str) -> String {
        prompts::question_synthesis(&self.company, payload, research)
    }
}
