//! Per-level transaction state.

use std::collections::HashMap;

/// A pending write recorded at one transaction level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    /// Insert or overwrite the key.
    Put {
        /// The new value.
        value: String,
    },
    /// Tombstone: the key is deleted at this level.
    Delete,
}

impl PendingWrite {
    /// Returns the pending value, or `None` for a tombstone.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Put { value } => Some(value),
            Self::Delete => None,
        }
    }

    /// Checks if this write is a tombstone.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// The pending writes of a single open transaction.
///
/// A key missing from the change-set means "no opinion at this level";
/// lookups fall through to the enclosing level. A key mapped to
/// [`PendingWrite::Delete`] stops the lookup and reports the key absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Pending writes: key -> write operation.
    writes: HashMap<String, PendingWrite>,
}

impl ChangeSet {
    /// Creates an empty change-set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a put, replacing any earlier entry for the key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.writes.insert(
            key.into(),
            PendingWrite::Put {
                value: value.into(),
            },
        );
    }

    /// Records a tombstone, replacing any earlier entry for the key.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), PendingWrite::Delete);
    }

    /// Gets the entry for a key at this level only.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&PendingWrite> {
        self.writes.get(key)
    }

    /// Returns all pending writes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PendingWrite)> {
        self.writes.iter().map(|(key, write)| (key.as_str(), write))
    }

    /// Returns the number of pending writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Checks if the change-set records no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Returns the number of tombstones.
    #[must_use]
    pub fn tombstone_count(&self) -> usize {
        self.writes.values().filter(|w| w.is_tombstone()).count()
    }

    /// Merges this change-set into its parent level.
    ///
    /// Every entry, value or tombstone, overwrites the parent's entry for
    /// the same key. Runs in time proportional to `self.len()`.
    pub fn merge_into(self, parent: &mut ChangeSet) {
        parent.writes.extend(self.writes);
    }

    /// Applies this change-set to the committed map.
    ///
    /// Puts insert or overwrite; tombstones remove the key, and removing
    /// a key that is already absent is not an error.
    pub fn apply_to(self, base: &mut HashMap<String, String>) {
        for (key, write) in self.writes {
            match write {
                PendingWrite::Put { value } => {
                    base.insert(key, value);
                }
                PendingWrite::Delete => {
                    base.remove(&key);
                }
            }
        }
    }
}
