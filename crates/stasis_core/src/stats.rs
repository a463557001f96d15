//! Store statistics.
//!
//! Counters for the operations a [`Store`](crate::Store) has served.
//!
//! # Usage
//!
//! ```rust
//! use stasis_core::Store;
//!
//! let mut store = Store::new();
//! store.set("a", "1");
//! let _ = store.get("a");
//! let _ = store.get("missing");
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.reads, 2);
//! assert_eq!(stats.misses, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a store.
///
/// All counters are monotonically increasing, except `max_depth`, which
/// records the deepest nesting seen so far.
#[derive(Debug, Default)]
pub struct StoreStats {
    // Operation counters
    /// Total number of `get` calls.
    reads: AtomicU64,
    /// Total number of successful `set` calls.
    writes: AtomicU64,
    /// Total number of successful `delete` calls.
    deletes: AtomicU64,
    /// Total number of `get`/`delete` calls that failed with `KeyNotFound`.
    misses: AtomicU64,

    // Transaction counters
    /// Total number of transactions begun.
    transactions_begun: AtomicU64,
    /// Total number of transactions committed.
    transactions_committed: AtomicU64,
    /// Total number of transactions rolled back.
    transactions_rolled_back: AtomicU64,
    /// Total number of commit/rollback calls with no open transaction.
    no_transaction_errors: AtomicU64,
    /// Deepest nesting reached.
    max_depth: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self, depth: usize) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_no_transaction(&self) {
        self.no_transaction_errors.fetch_add(1, Ordering::Relaxed);
    }

    // === Getter methods (public API) ===

    /// Returns the total number of `get` calls.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the total number of `set` calls.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of successful deletes.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups and deletes that found no key.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions begun.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the number of commit/rollback calls made outside a transaction.
    pub fn no_transaction_errors(&self) -> u64 {
        self.no_transaction_errors.load(Ordering::Relaxed)
    }

    /// Returns the deepest nesting reached.
    pub fn max_depth(&self) -> u64 {
        self.max_depth.load(Ordering::Relaxed)
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            deletes: self.deletes(),
            misses: self.misses(),
            transactions_begun: self.transactions_begun(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            no_transaction_errors: self.no_transaction_errors(),
            max_depth: self.max_depth(),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.transactions_begun.store(0, Ordering::Relaxed);
        self.transactions_committed.store(0, Ordering::Relaxed);
        self.transactions_rolled_back.store(0, Ordering::Relaxed);
        self.no_transaction_errors.store(0, Ordering::Relaxed);
        self.max_depth.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of store statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Total `get` calls.
    pub reads: u64,
    /// Total `set` calls.
    pub writes: u64,
    /// Successful deletes.
    pub deletes: u64,
    /// Lookups and deletes that found no key.
    pub misses: u64,
    /// Transactions begun.
    pub transactions_begun: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Commit/rollback calls made outside a transaction.
    pub no_transaction_errors: u64,
    /// Deepest nesting reached.
    pub max_depth: u64,
}

impl StatsSnapshot {
    /// Returns the number of transactions begun but not yet finished.
    #[must_use]
    pub fn open_transactions(&self) -> u64 {
        self.transactions_begun
            .saturating_sub(self.transactions_committed + self.transactions_rolled_back)
    }
}
