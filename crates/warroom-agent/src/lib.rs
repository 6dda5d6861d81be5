//! Agent loops that research an earnings dataset through tool calls
//!
//! Two loop variants share one bounded state machine: one anticipates tough
//! analyst questions, the other drafts an executive defense to a single
//! question. Progress streams out as [`AgentEvent`]s over an mpsc channel.

pub mod defense;
pub mod dispatch;
pub mod events;
pub mod parser;
pub mod prompts;
pub mod question;
pub mod runner;
pub mod state;
pub mod variant;

pub use defense::DefenseVariant;
pub use events::AgentEvent;
pub use parser::{QuestionRecord, parse_questions};
pub use question::QuestionVariant;
pub use runner::AgentLoop;
pub use variant::LoopVariant;
