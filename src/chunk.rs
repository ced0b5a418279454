//! Partitioning of the input record stream into fixed-size chunks.
//!
//! Each partition is a contiguous slice of the input. Partitions are
//! disjoint, their concatenation equals the input, and every partition has
//! `size` elements except possibly the last.

use crate::error::{DedupError, Result};

/// Split `records` into contiguous partitions of `size` elements.
///
/// Order matches the input; no record is dropped, duplicated, or
/// reordered. Fails with `InvalidConfiguration` if `size` is zero.
pub fn partition<T>(records: &[T], size: usize) -> Result<Vec<&[T]>> {
    if size == 0 {
        return Err(DedupError::InvalidConfiguration(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    Ok(records.chunks(size).collect())
}
