//! Stress tests for Stasis.
//!
//! These helpers drive a store with many operations, either from one
//! thread or from several threads sharing a [`SharedStore`].

use crate::fixtures::{fixture_key, fixture_value};
use stasis_core::{SharedStore, Store};
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of transactions per thread.
    pub transactions: usize,
    /// Number of concurrent threads (for concurrent tests).
    pub threads: usize,
    /// Writes per transaction.
    pub writes_per_transaction: usize,
    /// Number of distinct keys.
    pub key_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            transactions: 1_000,
            threads: 4,
            writes_per_transaction: 8,
            key_count: 256,
        }
    }
}

/// Runs nested transactions from one thread.
///
/// Every transaction writes to an inner level and commits it; every
/// fourth outer transaction is rolled back.
pub fn stress_nested_transactions(store: &mut Store, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for t in 0..config.transactions {
        store.begin();
        store.begin();
        for w in 0..config.writes_per_transaction {
            let i = (t * config.writes_per_transaction + w) % config.key_count.max(1);
            store.set(fixture_key(i), fixture_value(i, t));
        }
        let inner = store.commit();
        let outer = if t % 4 == 3 {
            store.rollback()
        } else {
            store.commit()
        };

        match (inner, outer) {
            (Ok(()), Ok(())) => successful += 1,
            _ => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Runs transactions from several threads against one shared store.
///
/// Each thread writes, reads back, and deletes its own keys inside a
/// single locked transaction, so every transaction is expected to
/// succeed.
pub fn stress_concurrent_transactions(store: &SharedStore, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|thread_id| {
            let store = store.clone();
            let config = config.clone();
            thread::spawn(move || {
                let mut successful = 0usize;
                let mut failed = 0usize;
                for t in 0..config.transactions {
                    let result = store.transaction(|tx| {
                        for w in 0..config.writes_per_transaction {
                            let key = format!("t{thread_id}-{w}");
                            tx.set(key.clone(), fixture_value(w, t));
                            tx.get(&key)?;
                        }
                        tx.delete(&format!("t{thread_id}-0"))
                    });
                    match result {
                        Ok(()) => successful += 1,
                        Err(_) => failed += 1,
                    }
                }
                (successful, failed)
            })
        })
        .collect();

    let mut successful = 0usize;
    let mut failed = 0usize;
    for handle in handles {
        match handle.join() {
            Ok((s, f)) => {
                successful += s;
                failed += f;
            }
            Err(_) => failed += config.transactions,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}
