//! Test fixtures.
//!
//! Helpers that build stores in known states.

use crate::generators::Operation;
use stasis_core::Store;

/// Returns the key used by fixtures for index `i`.
#[must_use]
pub fn fixture_key(i: usize) -> String {
    format!("key{i}")
}

/// Returns the value used by fixtures for index `i` at `level`.
#[must_use]
pub fn fixture_value(i: usize, level: usize) -> String {
    format!("value{i}@{level}")
}

/// Creates a store with `count` committed keys and no open transaction.
///
/// Key `key{i}` holds `value{i}@0`.
#[must_use]
pub fn populated_store(count: usize) -> Store {
    Store::with_entries((0..count).map(|i| (fixture_key(i), fixture_value(i, 0))))
}

/// Creates a store with `count` committed keys and `depth` open
/// transactions.
///
/// Level `n` (1-based) overwrites the first `count / 2^n` keys with
/// `value{i}@n`, so lower-numbered keys are shadowed most often.
#[must_use]
pub fn nested_store(count: usize, depth: usize) -> Store {
    let mut store = populated_store(count);
    for level in 1..=depth {
        store.begin();
        let width = count >> level.min(usize::BITS as usize - 1);
        for i in 0..width {
            store.set(fixture_key(i), fixture_value(i, level));
        }
    }
    store
}

/// Applies `ops` to a fresh store, ignoring failures.
#[must_use]
pub fn store_from_ops(ops: &[Operation]) -> Store {
    let mut store = Store::new();
    for op in ops {
        let _ = op.apply(&mut store);
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_store_has_committed_keys() {
        let store = populated_store(10);
        assert_eq!(store.committed_len(), 10);
        assert_eq!(store.depth(), 0);
        assert_eq!(store.get("key3"), Ok("value3@0"));
    }

    #[test]
    fn nested_store_shadows_by_level() {
        let store = nested_store(8, 3);
        assert_eq!(store.depth(), 3);
        assert_eq!(store.get("key0"), Ok("value0@3"));
        assert_eq!(store.get("key1"), Ok("value1@2"));
        assert_eq!(store.get("key3"), Ok("value3@1"));
        assert_eq!(store.get("key7"), Ok("value7@0"));
    }

    #[test]
    fn store_from_ops_skips_failures() {
        let ops = vec![
            Operation::Commit,
            Operation::Set {
                key: "a".into(),
                value: "1".into(),
            },
            Operation::Delete { key: "b".into() },
        ];
        let store = store_from_ops(&ops);
        assert_eq!(store.get("a"), Ok("1"));
    }
}
