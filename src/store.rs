//! Global duplicate store shared across all partition workers.
//!
//! A single mutex-guarded set of accepted content strings, used only for
//! cheap exact-match pruning. The set grows monotonically for the lifetime
//! of a run; nothing is ever removed. Fuzzy comparison deliberately does
//! not read this store (see `worker`), so the critical sections here are a
//! single lookup and a single batch union.

use std::collections::HashSet;
use std::sync::Mutex;
use thiserror::Error;

/// The global store's mutex was poisoned by a panicking worker.
///
/// Treated as fatal for the affected partition only; the coordinator
/// reports it and completes the remaining partitions.
#[derive(Debug, Error)]
#[error("global duplicate store lock poisoned")]
pub struct StorePoisoned;

/// Mutex-guarded set of content strings accepted so far, shared by every
/// worker in a run.
///
/// Owned by the coordinator and injected into workers at dispatch time;
/// never a process-wide singleton.
#[derive(Debug, Default)]
pub struct GlobalSeen {
    inner: Mutex<HashSet<String>>,
}

impl GlobalSeen {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-membership test under the lock. Single lookup, nothing more.
    pub fn contains(&self, key: &str) -> Result<bool, StorePoisoned> {
        let guard = self.inner.lock().map_err(|_| StorePoisoned)?;
        Ok(guard.contains(key))
    }

    /// Idempotent union of a worker's local keys into the store.
    ///
    /// Returns the number of keys that were actually new.
    pub fn merge<I>(&self, keys: I) -> Result<usize, StorePoisoned>
    where
        I: IntoIterator<Item = String>,
    {
        let mut guard = self.inner.lock().map_err(|_| StorePoisoned)?;
        let before = guard.len();
        guard.extend(keys);
        Ok(guard.len() - before)
    }

    /// Number of distinct content strings accepted so far.
    pub fn len(&self) -> Result<usize, StorePoisoned> {
        let guard = self.inner.lock().map_err(|_| StorePoisoned)?;
        Ok(guard.len())
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> Result<bool, StorePoisoned> {
        Ok(self.len()? == 0)
    }
}
