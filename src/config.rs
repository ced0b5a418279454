//! Configuration for a deduplication run.

use crate::error::{DedupError, Result};
use crate::similarity::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Default number of records per partition.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default record field holding the text to deduplicate on.
pub const DEFAULT_CONTENT_FIELD: &str = "content";

/// Configuration for exact + fuzzy deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Name of the record field containing the text to deduplicate on.
    pub content_field: String,
    /// Number of records per partition.
    pub chunk_size: usize,
    /// Similarity threshold in percent (0-100). Records scoring at or
    /// above this against their partition-local store are skipped.
    pub threshold: f64,
    /// Number of parallel workers in the pool.
    pub num_workers: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            content_field: DEFAULT_CONTENT_FIELD.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            threshold: DEFAULT_THRESHOLD,
            num_workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

impl DedupConfig {
    /// Set the content field name.
    #[must_use]
    pub fn with_content_field(mut self, field: impl Into<String>) -> Self {
        self.content_field = field.into();
        self
    }

    /// Set the partition size.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set the similarity threshold (percent).
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the worker pool size.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.num_workers = workers;
        self
    }

    /// Validate the configuration before any processing begins.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DedupError::InvalidConfiguration(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(DedupError::InvalidConfiguration(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        if self.num_workers == 0 {
            return Err(DedupError::InvalidConfiguration(
                "worker count must be greater than zero".to_string(),
            ));
        }
        if self.content_field.is_empty() {
            return Err(DedupError::InvalidConfiguration(
                "content field name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
