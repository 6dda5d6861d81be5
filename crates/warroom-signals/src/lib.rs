//! Deterministic financial signal engine
//!
//! Scans the subject company's quarterly metrics for statistically notable
//! declines and compares its growth against tracked competitors. Pure,
//! synchronous, and deterministic: identical input always yields identical
//! findings.

pub mod engine;
pub mod findings;
pub mod kpis;

pub use engine::{SignalEngine, SignalReport};
pub use findings::{AnomalyFinding, CompetitiveGap, SourceBucket, ThreatLevel};
pub use kpis::KpiSummary;
