//! TOC item identifiers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic identifier source for [`TocItem`](crate::TocItem) records.
///
/// Clones share the same counter, so handing one sequence to several engines
/// (possibly on different threads) yields identifiers unique across all of
/// them. A fresh sequence starts at 0.
#[derive(Clone, Debug, Default)]
pub struct IdSequence(Arc<AtomicU64>);

impl IdSequence {
    /// Create a sequence starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence whose first identifier is `first`.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self(Arc::new(AtomicU64::new(first)))
    }

    /// Allocate the next identifier.
    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Identifier that the next call to [`next_id`](Self::next_id) would return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
