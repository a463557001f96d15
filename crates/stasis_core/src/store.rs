//! The transactional map.

use crate::error::{StoreError, StoreResult};
use crate::stats::StoreStats;
use crate::transaction::{ChangeSet, PendingWrite};
use std::collections::HashMap;
use tracing::{debug, trace};

/// An in-memory key-value store with nested transactions.
///
/// `Store` owns the committed map and a stack of [`ChangeSet`]s, one per
/// open transaction. Index 0 of the stack is the outermost transaction and
/// the last entry is the innermost.
///
/// - Writes go to the innermost change-set, or straight to the committed
///   map when no transaction is open.
/// - Reads scan the stack from innermost to outermost; the first level
///   holding the key decides, and a tombstone at that level means the key
///   is absent. Keys no level mentions fall back to the committed map.
/// - `commit` merges exactly one level outward; `rollback` discards it.
///
/// # Example
///
/// ```rust
/// use stasis_core::{Store, StoreError};
///
/// let mut store = Store::new();
/// store.set("name", "stasis");
///
/// store.begin();
/// store.delete("name")?;
/// assert_eq!(store.get("name"), Err(StoreError::KeyNotFound));
///
/// store.rollback()?;
/// assert_eq!(store.get("name"), Ok("stasis"));
/// # Ok::<(), StoreError>(())
/// ```
///
/// # Thread Safety
///
/// `Store` has no internal synchronization; mutating operations take
/// `&mut self`. Share one between threads through
/// [`SharedStore`](crate::SharedStore) or another exclusive lock.
#[derive(Debug, Default)]
pub struct Store {
    /// Committed state.
    committed: HashMap<String, String>,
    /// Open transactions, outermost first.
    transactions: Vec<ChangeSet>,
    /// Operation counters.
    stats: StoreStats,
}

impl Store {
    /// Creates an empty store with no open transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose committed map holds the given entries.
    #[must_use]
    pub fn with_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            committed: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Opens a new, innermost transaction.
    pub fn begin(&mut self) {
        self.transactions.push(ChangeSet::new());
        self.stats.record_begin(self.transactions.len());
        debug!(depth = self.transactions.len(), "transaction begun");
    }

    /// Commits the innermost transaction.
    ///
    /// If it was the outermost transaction, its writes are applied to the
    /// committed map. Otherwise they are merged into the enclosing
    /// transaction, overwriting that level's entries for the same keys.
    /// Either way the cost is proportional to the number of keys the
    /// committed level touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    pub fn commit(&mut self) -> StoreResult<()> {
        let changes = self.pop_transaction()?;
        let changed = changes.len();

        match self.transactions.last_mut() {
            Some(parent) => changes.merge_into(parent),
            None => changes.apply_to(&mut self.committed),
        }

        self.stats.record_commit();
        debug!(
            depth = self.transactions.len(),
            changes = changed,
            "transaction committed"
        );
        Ok(())
    }

    /// Discards the innermost transaction and every write made in it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    pub fn rollback(&mut self) -> StoreResult<()> {
        let changes = self.pop_transaction()?;

        self.stats.record_rollback();
        debug!(
            depth = self.transactions.len(),
            discarded = changes.len(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Runs `f` inside a new transaction.
    ///
    /// The transaction is committed if `f` returns `Ok` and rolled back if
    /// it returns `Err`. `f` must leave every transaction it opens closed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stasis_core::{Store, StoreError};
    ///
    /// let mut store = Store::new();
    /// let result: Result<(), StoreError> = store.transaction(|tx| {
    ///     tx.set("a", "1");
    ///     tx.delete("missing")
    /// });
    ///
    /// assert_eq!(result, Err(StoreError::KeyNotFound));
    /// assert!(!store.contains("a"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`. Returns
    /// [`StoreError::NoActiveTransaction`] if `f` leaves the depth
    /// unbalanced. If `f` already closed the level it was given, no further
    /// level is touched. If `f` left extra levels open, they are rolled back
    /// together with its own level.
    pub fn transaction<T, F>(&mut self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Store) -> StoreResult<T>,
    {
        let depth = self.depth();
        self.begin();
        let result = f(self);

        if self.depth() != depth + 1 {
            debug!(
                expected = depth + 1,
                actual = self.depth(),
                "transaction closure left depth unbalanced"
            );
            if self.depth() <= depth {
                self.stats.record_no_transaction();
            }
            while self.depth() > depth {
                self.rollback()?;
            }
            return Err(StoreError::NoActiveTransaction);
        }

        match result {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => {
                self.rollback()?;
                Err(err)
            }
        }
    }

    /// Sets a key to a value in the current scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.transactions.len(), "set");

        match self.transactions.last_mut() {
            Some(changes) => changes.put(key, value),
            None => {
                self.committed.insert(key, value.into());
            }
        }
        self.stats.record_write();
    }

    /// Returns the effective value of a key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if the key was never set, was
    /// deleted, or is hidden by a tombstone in an open transaction.
    pub fn get(&self, key: &str) -> StoreResult<&str> {
        self.stats.record_read();
        match self.resolve(key) {
            Some(value) => Ok(value),
            None => {
                self.stats.record_miss();
                Err(StoreError::KeyNotFound)
            }
        }
    }

    /// Deletes a key in the current scope.
    ///
    /// With no open transaction the key is removed from the committed map.
    /// Inside a transaction a tombstone is written to the innermost level,
    /// even when that same level also holds the key's value, so that the
    /// deletion reaches outer levels on commit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if the key has no effective
    /// value; no tombstone is written in that case.
    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        if self.resolve(key).is_none() {
            self.stats.record_miss();
            return Err(StoreError::KeyNotFound);
        }

        trace!(key = %key, depth = self.transactions.len(), "delete");
        match self.transactions.last_mut() {
            Some(changes) => changes.delete(key),
            None => {
                self.committed.remove(key);
            }
        }
        self.stats.record_delete();
        Ok(())
    }

    /// Checks whether a key has an effective value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.transactions.len()
    }

    /// Checks whether at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.transactions.is_empty()
    }

    /// Returns the number of entries in the committed map.
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.committed.len()
    }

    /// Returns the number of pending writes in the innermost transaction.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.transactions.last().map_or(0, ChangeSet::len)
    }

    /// Returns the committed value of a key, ignoring open transactions.
    #[must_use]
    pub fn committed_value(&self, key: &str) -> Option<&str> {
        self.committed.get(key).map(String::as_str)
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Resolves a key innermost-first through the open transactions, then
    /// the committed map.
    fn resolve(&self, key: &str) -> Option<&str> {
        for changes in self.transactions.iter().rev() {
            if let Some(write) = changes.lookup(key) {
                return match write {
                    PendingWrite::Put { value } => Some(value.as_str()),
                    PendingWrite::Delete => None,
                };
            }
        }
        self.committed_value(key)
    }

    fn pop_transaction(&mut self) -> StoreResult<ChangeSet> {
        match self.transactions.pop() {
            Some(changes) => Ok(changes),
            None => {
                self.stats.record_no_transaction();
                Err(StoreError::NoActiveTransaction)
            }
        }
    }
}
