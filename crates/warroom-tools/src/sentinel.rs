//! Sentinel tools that mark the end of a research phase
//!
//! These are exposed to the model as ordinary tools so it can hand back its
//! final payload through a tool call. The agent loop intercepts them by name
//! before dispatch, so their executors only ever run if something goes wrong
//! with that interception.

use crate::tool::Tool;
use serde_json::{Value, json};

/// Name of the sentinel that ends the question-research phase.
pub const GENERATE_QUESTIONS: &str = "generate_questions";

/// Name of the sentinel that ends the defense-research phase.
pub const GENERATE_DEFENSE: &str = "generate_defense";

/// Signals that research is complete and carries the synthesized findings
pub struct GenerateQuestionsTool;

impl Tool for GenerateQuestionsTool {
    fn name(&self) -> &str {
        GENERATE_QUESTIONS
    }

    fn description(&self) -> &str {
        "Call this when research is complete to generate the final list of \
         anticipated analyst questions. Pass a summary of everything learned."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "findings": {
                    "type": "string",
                    "description": "Summary of the research findings to base questions on"
                }
            },
            "required": ["findings"]
        })
    }

    fn execute(&self, _args: &Value) -> String {
        "generate_questions is handled by the agent loop".to_string()
    }
}

/// Signals that research is complete and carries the defense talking points
pub struct GenerateDefenseTool;

impl Tool for GenerateDefenseTool {
    fn name(&self) -> &str {
        GENERATE_DEFENSE
    }

    fn description(&self) -> &str {
        "Call this when research is complete to generate the final defense \
         brief. Pass the key talking points gathered from the data."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "talking_points": {
                    "type": "string",
                    "description": "Key data points and arguments for the defense"
                }
            },
            "required": ["talking_points"]
        })
    }

    fn execute(&self, _args: &Value) -> String {
        "generate_defense is handled by the agent loop".to_string()
    }
}
