//! Core types for the earnings war room
//!
//! This crate defines the in-memory dataset bundle the rest of the workspace
//! queries, plus the shared error type.

pub mod dataset;
pub mod error;

pub use dataset::{
    DataBundle, FilingRecord, Metric, NewsRecord, PeerMetricRecord, PressReleaseRecord,
    QuarterlyMetricRecord, RatingRecord, TranscriptRecord,
};
pub use error::{Error, Result};
