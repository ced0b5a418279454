//! Coordinator: worker pool ownership and run orchestration.
//!
//! The coordinator partitions the input, runs every partition on a
//! fixed-size rayon pool, and flattens the surviving records in dispatch
//! order (not completion order). The global duplicate store lives here for
//! exactly one run and is injected into each worker.

use crate::chunk;
use crate::config::DedupConfig;
use crate::error::Result;
use crate::store::GlobalSeen;
use crate::worker::{self, PartitionOutcome, SkipCounts, SkipReason};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Aggregate statistics for one deduplication run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DedupStats {
    /// Total records read from the input.
    pub total: usize,
    /// Records that survived deduplication.
    pub accepted: usize,
    /// Skip counts broken down by reason.
    pub skipped: SkipCounts,
    /// Number of partitions dispatched.
    pub partitions: usize,
    /// Partitions that failed (poisoned global-store lock). Their records
    /// are neither accepted nor counted as skipped.
    pub failed_partitions: usize,
    /// Processing time in seconds.
    pub elapsed_secs: f64,
}

impl DedupStats {
    /// Throughput in records per second.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.total as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }
}

/// Result of a deduplication run: surviving records plus statistics.
#[derive(Debug, Clone, Default)]
pub struct DedupReport {
    /// Surviving records (original lines), per-partition input order,
    /// partitions concatenated in dispatch order.
    pub records: Vec<String>,
    /// Run statistics.
    pub stats: DedupStats,
}

/// Exact + fuzzy deduplicator over JSONL records.
#[derive(Debug)]
pub struct Deduplicator {
    config: DedupConfig,
}

impl Deduplicator {
    /// Create a deduplicator, validating the configuration up front.
    pub fn new(config: DedupConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this deduplicator runs with.
    #[must_use]
    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Run two-tier deduplication over the input lines.
    ///
    /// Partitions the input, processes all partitions on a fixed-size
    /// worker pool, and flattens survivors in dispatch order. A failed
    /// partition is counted and logged but never aborts the run.
    pub fn deduplicate_lines(&self, lines: &[String]) -> Result<DedupReport> {
        let start = Instant::now();

        let partitions = chunk::partition(lines, self.config.chunk_size)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_workers)
            .build()?;

        let global = GlobalSeen::new();
        let field = self.config.content_field.as_str();
        let threshold = self.config.threshold;

        // par_iter preserves dispatch order in the collected results even
        // when partitions complete out of order.
        let outcomes: Vec<std::result::Result<PartitionOutcome, _>> = pool.install(|| {
            partitions
                .par_iter()
                .map(|part| worker::process_partition(part, field, threshold, &global))
                .collect()
        });

        let mut report = DedupReport::default();
        report.stats.total = lines.len();
        report.stats.partitions = partitions.len();

        for outcome in outcomes {
            match outcome {
                Ok(mut part) => {
                    report.stats.skipped.merge(&part.skipped);
                    report.records.append(&mut part.records);
                }
                Err(e) => {
                    tracing::error!("partition failed: {}", e);
                    report.stats.failed_partitions += 1;
                }
            }
        }

        report.stats.accepted = report.records.len();
        report.stats.elapsed_secs = start.elapsed().as_secs_f64();
        Ok(report)
    }

    /// Single-threaded exact-only deduplication.
    ///
    /// The cheap pre-pass the full pipeline runs before fuzzy matching:
    /// one sequential scan, byte-identical content pruning, no pool and no
    /// similarity scoring.
    pub fn deduplicate_exact(&self, lines: &[String]) -> Result<DedupReport> {
        self.config.validate()?;
        let start = Instant::now();

        let mut seen: HashSet<String> = HashSet::new();
        let mut report = DedupReport::default();
        report.stats.total = lines.len();
        report.stats.partitions = 1;

        for line in lines {
            let value: serde_json::Value = match serde_json::from_str(line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("dropping unparseable record: {}", e);
                    report.stats.skipped.record(SkipReason::ParseError);
                    continue;
                }
            };

            let content = value
                .get(&self.config.content_field)
                .and_then(|v| v.as_str())
                .unwrap_or("");

            if content.is_empty() {
                report.stats.skipped.record(SkipReason::EmptyContent);
                continue;
            }

            if !seen.insert(content.to_string()) {
                report.stats.skipped.record(SkipReason::ExactDuplicate);
                continue;
            }

            report.records.push(line.clone());
        }

        report.stats.accepted = report.records.len();
        report.stats.elapsed_secs = start.elapsed().as_secs_f64();
        Ok(report)
    }
}
