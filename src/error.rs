//! Error types for textsieve.

use thiserror::Error;

/// Result type alias for deduplication operations.
pub type Result<T> = std::result::Result<T, DedupError>;

/// Errors that abort a deduplication run before or during startup.
///
/// Per-record failures (unparseable lines, missing fields) never surface
/// here; the worker converts them to skip counts.
#[derive(Error, Debug)]
pub enum DedupError {
    /// Invalid configuration value, rejected before any processing.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The worker pool could not be created.
    #[error("failed to create worker pool: {0}")]
    PoolCreation(#[from] rayon::ThreadPoolBuildError),

    /// File I/O failure at the input/output boundary.
    #[error(transparent)]
    Io(#[from] crate::io::IoError),
}
