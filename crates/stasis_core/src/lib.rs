//! # Stasis Core
//!
//! In-memory key-value store with nested transactions.
//!
//! This crate provides:
//! - [`Store`], the transactional map over string keys and values
//! - [`ChangeSet`] and [`PendingWrite`], the per-transaction write sets
//! - [`StoreError`], the two recoverable error kinds
//! - [`StoreStats`], operation counters
//! - [`SharedStore`], a lock-guarded handle for use across threads
//!
//! ## Example
//!
//! ```rust
//! use stasis_core::{Store, StoreError};
//!
//! let mut store = Store::new();
//! store.set("outer", "v1");
//!
//! store.begin();
//! store.set("outer", "v2");
//! store.begin();
//! store.set("inner", "v3");
//! store.commit()?; // merged into the enclosing transaction
//!
//! assert_eq!(store.get("inner"), Ok("v3"));
//! store.rollback()?; // discards both writes
//!
//! assert_eq!(store.get("outer"), Ok("v1"));
//! assert_eq!(store.get("inner"), Err(StoreError::KeyNotFound));
//! # Ok::<(), StoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod shared;
mod stats;
mod store;
mod transaction;

pub use error::{StoreError, StoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::Store;
pub use transaction::{ChangeSet, PendingWrite};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
