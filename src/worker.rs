//! Partition worker: the per-record deduplication algorithm.
//!
//! Each worker owns one partition and a partition-local store of accepted
//! content. Exact-match pruning consults the shared [`GlobalSeen`] store
//! under its lock; fuzzy matching runs against the local store only. This
//! keeps the fuzzy scorer's cost bounded by partition size instead of
//! total corpus size, at the price of letting similar-but-not-identical
//! records survive in different partitions. That tradeoff is deliberate;
//! do not widen the fuzzy comparison to the global store.

use crate::similarity;
use crate::store::{GlobalSeen, StorePoisoned};
use serde::{Deserialize, Serialize};

/// Why a record was skipped instead of emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Content field missing, not a string, or empty.
    EmptyContent,
    /// Content already present in the global duplicate store.
    ExactDuplicate,
    /// Content scored at or above the threshold against the local store.
    FuzzyDuplicate,
    /// The line was not valid JSON.
    ParseError,
}

/// Skip counts broken down by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Records with a missing or empty content field.
    pub empty_content: usize,
    /// Records whose content was already accepted somewhere in the run.
    pub exact_duplicate: usize,
    /// Records too similar to an earlier record in the same partition.
    pub fuzzy_duplicate: usize,
    /// Lines that failed to parse as JSON.
    pub parse_error: usize,
}

impl SkipCounts {
    /// Record one skip.
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::EmptyContent => self.empty_content += 1,
            SkipReason::ExactDuplicate => self.exact_duplicate += 1,
            SkipReason::FuzzyDuplicate => self.fuzzy_duplicate += 1,
            SkipReason::ParseError => self.parse_error += 1,
        }
    }

    /// Total skips across all reasons.
    #[must_use]
    pub fn total(&self) -> usize {
        self.empty_content + self.exact_duplicate + self.fuzzy_duplicate + self.parse_error
    }

    /// Fold another partition's counts into this one.
    pub fn merge(&mut self, other: &SkipCounts) {
        self.empty_content += other.empty_content;
        self.exact_duplicate += other.exact_duplicate;
        self.fuzzy_duplicate += other.fuzzy_duplicate;
        self.parse_error += other.parse_error;
    }
}

/// Result of processing one partition.
#[derive(Debug, Clone, Default)]
pub struct PartitionOutcome {
    /// Surviving records, as their original lines, in input order.
    pub records: Vec<String>,
    /// Skip counts for this partition.
    pub skipped: SkipCounts,
}

/// Process one partition of raw JSONL lines.
///
/// For each line, in input order: parse (fail-soft), check for empty
/// content, check the global store for an exact duplicate under its lock,
/// check the local store for a fuzzy duplicate, then accept. After the
/// last record, the local store is merged into the global store.
///
/// Only a poisoned global-store lock fails the partition; every per-record
/// error is logged and converted to a skip.
pub fn process_partition(
    lines: &[String],
    content_field: &str,
    threshold: f64,
    global: &GlobalSeen,
) -> Result<PartitionOutcome, StorePoisoned> {
    let mut local_seen: Vec<String> = Vec::new();
    let mut records = Vec::new();
    let mut skipped = SkipCounts::default();

    for line in lines {
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("dropping unparseable record: {}", e);
                skipped.record(SkipReason::ParseError);
                continue;
            }
        };

        let content = value
            .get(content_field)
            .and_then(|v| v.as_str())
            .unwrap_or("");

        if content.is_empty() {
            skipped.record(SkipReason::EmptyContent);
            continue;
        }

        if global.contains(content)? {
            skipped.record(SkipReason::ExactDuplicate);
            continue;
        }

        if similarity::is_near_duplicate(
            content,
            local_seen.iter().map(String::as_str),
            threshold,
        ) {
            skipped.record(SkipReason::FuzzyDuplicate);
            continue;
        }

        local_seen.push(content.to_string());
        records.push(line.clone());
    }

    global.merge(local_seen)?;

    Ok(PartitionOutcome { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unique_records_all_survive() {
        let global = GlobalSeen::new();
        let input = lines(&[
            r#"{"content":"First document about dogs."}"#,
            r#"{"content":"Entirely unrelated physics notes."}"#,
        ]);

        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();
        assert_eq!(outcome.records, input);
        assert_eq!(outcome.skipped.total(), 0);
        assert_eq!(global.len().unwrap(), 2);
    }

    #[test]
    fn test_fuzzy_duplicate_within_partition() {
        let global = GlobalSeen::new();
        let input = lines(&[
            r#"{"content":"The cat sat."}"#,
            r#"{"content":"The cat sat!"}"#,
            r#"{"content":"Completely different text."}"#,
        ]);

        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0], input[0]);
        assert_eq!(outcome.records[1], input[2]);
        assert_eq!(outcome.skipped.fuzzy_duplicate, 1);
        assert_eq!(outcome.skipped.total(), 1);
    }

    #[test]
    fn test_exact_duplicate_against_global_store() {
        let global = GlobalSeen::new();
        global
            .merge(std::iter::once("Already accepted.".to_string()))
            .unwrap();

        let input = lines(&[r#"{"content":"Already accepted."}"#]);
        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped.exact_duplicate, 1);
    }

    #[test]
    fn test_identical_records_in_same_partition() {
        // Identical content scores 100 against the local store, so the
        // second copy is a fuzzy skip even before any global merge.
        let global = GlobalSeen::new();
        let input = lines(&[
            r#"{"content":"Same text."}"#,
            r#"{"content":"Same text."}"#,
        ]);

        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped.fuzzy_duplicate, 1);
    }

    #[test]
    fn test_empty_and_missing_content_skipped() {
        let global = GlobalSeen::new();
        let input = lines(&[
            r#"{"content":""}"#,
            r#"{"other_field":"no content here"}"#,
            r#"{"content":42}"#,
        ]);

        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped.empty_content, 3);
        assert!(global.is_empty().unwrap());
    }

    #[test]
    fn test_parse_error_never_aborts_partition() {
        let global = GlobalSeen::new();
        let input = lines(&[
            "this is not json",
            r#"{"content":"Still processed fine."}"#,
        ]);

        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped.parse_error, 1);
    }

    #[test]
    fn test_local_store_merged_into_global() {
        let global = GlobalSeen::new();
        let input = lines(&[
            r#"{"content":"First entry here."}"#,
            r#"{"content":"Second, very different entry."}"#,
        ]);

        process_partition(&input, "content", 85.0, &global).unwrap();
        assert!(global.contains("First entry here.").unwrap());
        assert!(global.contains("Second, very different entry.").unwrap());
    }

    #[test]
    fn test_passthrough_fields_preserved() {
        let global = GlobalSeen::new();
        let input = lines(&[r#"{"content":"Keep me.","id":7,"source":"web"}"#]);

        let outcome = process_partition(&input, "content", 85.0, &global).unwrap();
        // The surviving record is the original line, untouched.
        assert_eq!(outcome.records[0], input[0]);
    }

    #[test]
    fn test_custom_content_field() {
        let global = GlobalSeen::new();
        let input = lines(&[r#"{"text":"Custom field name."}"#]);

        let outcome = process_partition(&input, "text", 85.0, &global).unwrap();
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn test_skip_counts_merge() {
        let mut a = SkipCounts {
            empty_content: 1,
            exact_duplicate: 2,
            fuzzy_duplicate: 3,
            parse_error: 4,
        };
        let b = SkipCounts {
            empty_content: 10,
            exact_duplicate: 20,
            fuzzy_duplicate: 30,
            parse_error: 40,
        };
        a.merge(&b);
        assert_eq!(a.total(), 110);
        assert_eq!(a.fuzzy_duplicate, 33);
    }
}
