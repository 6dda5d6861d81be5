//! Tool dispatch registry for the earnings war room
//!
//! Each tool pairs a declared schema (used only to instruct the model) with a
//! bound executor over the read-only dataset bundle. Executors return bounded,
//! human-readable digests - never raw rows - and absorb every data-absence
//! condition into an explanatory string instead of an error.

pub mod anomalies;
pub mod catalog;
pub mod compare;
pub mod filings;
pub mod metrics;
pub mod news;
pub mod press;
pub mod ratings;
pub mod registry;
pub mod sentinel;
pub mod tool;
pub mod transcripts;

pub use catalog::{defense_catalog, research_catalog};
pub use registry::ToolRegistry;
pub use sentinel::{GENERATE_DEFENSE, GENERATE_QUESTIONS};
pub use tool::Tool;
