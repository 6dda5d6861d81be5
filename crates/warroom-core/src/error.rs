//! Error types for warroom-core

use thiserror::Error;

/// Result type alias for warroom-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Dataset bundle could not be loaded or decoded
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Processing failed
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}
