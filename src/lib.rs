//! # textsieve
//!
//! Parallel exact and fuzzy deduplication for JSONL text corpora.
//!
//! Incoming records are compared against everything accepted so far using
//! a two-tier strategy:
//!
//! 1. **Exact tier**: a single mutex-guarded set of accepted content
//!    strings, shared by all workers, pruning byte-identical duplicates
//!    across the whole run.
//! 2. **Fuzzy tier**: a normalized edit-distance ratio against the
//!    worker's partition-local store only, pruning near-duplicates within
//!    a partition.
//!
//! Restricting fuzzy comparison to the local store bounds the scorer's
//! cost by partition size and keeps workers parallel; the price is that
//! similar-but-not-identical records in different partitions can both
//! survive. Both stores hold all accepted content in memory for the
//! lifetime of a run, which is a known scaling limit for very large
//! corpora.
//!
//! ## Example
//!
//! ```
//! use textsieve::{DedupConfig, Deduplicator};
//!
//! let lines = vec![
//!     r#"{"content":"The cat sat."}"#.to_string(),
//!     r#"{"content":"The cat sat!"}"#.to_string(),
//!     r#"{"content":"Completely different text."}"#.to_string(),
//! ];
//!
//! let config = DedupConfig::default().with_workers(1);
//! let dedup = Deduplicator::new(config).unwrap();
//! let report = dedup.deduplicate_lines(&lines).unwrap();
//!
//! assert_eq!(report.records.len(), 2);
//! assert_eq!(report.stats.skipped.fuzzy_duplicate, 1);
//! ```

pub mod chunk;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod io;
pub mod similarity;
pub mod store;
pub mod worker;

pub use chunk::partition;
pub use config::{DedupConfig, DEFAULT_CHUNK_SIZE, DEFAULT_CONTENT_FIELD};
pub use coordinator::{DedupReport, DedupStats, Deduplicator};
pub use error::{DedupError, Result};
pub use io::{read_lines, write_lines, IoError};
pub use similarity::{best_match, ratio, score, DEFAULT_THRESHOLD};
pub use store::{GlobalSeen, StorePoisoned};
pub use worker::{process_partition, PartitionOutcome, SkipCounts, SkipReason};
