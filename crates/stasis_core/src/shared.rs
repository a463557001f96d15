//! A synchronized handle for sharing one store between threads.

use crate::error::StoreResult;
use crate::stats::StatsSnapshot;
use crate::store::Store;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to a single [`Store`].
///
/// Every operation takes an exclusive lock for the duration of that one
/// call, so each call is atomic with respect to the others. Transaction
/// depth belongs to the store, not to the handle: a `begin` on one clone
/// opens a transaction that every clone sees. Use [`SharedStore::with`] or
/// [`SharedStore::transaction`] to run a whole sequence under one lock.
///
/// # Example
///
/// ```rust
/// use stasis_core::SharedStore;
/// use std::thread;
///
/// let store = SharedStore::new();
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let store = store.clone();
///         thread::spawn(move || store.set(format!("key{i}"), "value"))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(store.with(|s| s.committed_len()), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Creates a handle to a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Opens a new transaction. See [`Store::begin`].
    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    /// Commits the innermost transaction. See [`Store::commit`].
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open.
    pub fn commit(&self) -> StoreResult<()> {
        self.inner.lock().commit()
    }

    /// Rolls back the innermost transaction. See [`Store::rollback`].
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open.
    pub fn rollback(&self) -> StoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Sets a key. See [`Store::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.lock().set(key, value);
    }

    /// Returns an owned copy of the effective value. See [`Store::get`].
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key has no effective value.
    pub fn get(&self, key: &str) -> StoreResult<String> {
        self.inner.lock().get(key).map(str::to_owned)
    }

    /// Deletes a key. See [`Store::delete`].
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key has no effective value.
    pub fn delete(&self, key: &str) -> StoreResult<()> {
        self.inner.lock().delete(key)
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }

    /// Returns a snapshot of the store's counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut *store)
    }

    /// Runs `f` in a transaction while holding the lock. See
    /// [`Store::transaction`].
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or `NoActiveTransaction` if `f`
    /// leaves the depth unbalanced.
    pub fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Store) -> StoreResult<T>,
    {
        self.inner.lock().transaction(f)
    }

    /// Returns the store if this is the last handle to it.
    ///
    /// # Errors
    ///
    /// Returns the handle unchanged if other clones are still alive.
    pub fn try_into_inner(self) -> Result<Store, Self> {
        Arc::try_unwrap(self.inner)
            .map(|mutex| mutex.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self::from_store(store)
    }
}
