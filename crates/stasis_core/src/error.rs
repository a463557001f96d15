//! Error types for Stasis core.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// Both kinds are expected in normal operation. A failed operation never
/// leaves the store partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StoreError {
    /// The key has no effective value (never set, or shadowed by a tombstone).
    #[error("key not found")]
    KeyNotFound,

    /// `commit` or `rollback` was called with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,
}

impl StoreError {
    /// Returns true if this is a [`StoreError::KeyNotFound`].
    #[must_use]
    pub const fn is_key_not_found(self) -> bool {
        matches!(self, Self::KeyNotFound)
    }

    /// Returns true if this is a [`StoreError::NoActiveTransaction`].
    #[must_use]
    pub const fn is_no_active_transaction(self) -> bool {
        matches!(self, Self::NoActiveTransaction)
    }
}
