//! Transaction levels.
//!
//! Each open transaction owns one [`ChangeSet`]: the writes made at that
//! level and not yet merged outward. Deletions are recorded as explicit
//! tombstones so that a delete survives a commit into the parent level.

mod state;

pub use state::{ChangeSet, PendingWrite};
