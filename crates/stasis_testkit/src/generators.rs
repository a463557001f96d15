//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so that generated sequences
//! overwrite, delete and shadow the same keys often.

use crate::model::ModelStore;
use proptest::prelude::*;
use stasis_core::{Store, StoreResult};

/// Strategy for generating keys from a small, collision-prone set.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]").expect("Invalid regex")
}

/// Strategy for generating values.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,8}").expect("Invalid regex")
}

/// A single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Set a key
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Get a key
    Get {
        /// Key
        key: String,
    },
    /// Delete a key
    Delete {
        /// Key
        key: String,
    },
    /// Open a transaction
    Begin,
    /// Commit the innermost transaction
    Commit,
    /// Roll back the innermost transaction
    Rollback,
}

/// What an operation returned: a value for `Get`, nothing otherwise.
pub type Outcome = StoreResult<Option<String>>;

impl Operation {
    /// Applies the operation to a store.
    pub fn apply(&self, store: &mut Store) -> Outcome {
        match self {
            Self::Set { key, value } => {
                store.set(key.as_str(), value.as_str());
                Ok(None)
            }
            Self::Get { key } => store.get(key).map(|v| Some(v.to_string())),
            Self::Delete { key } => store.delete(key).map(|()| None),
            Self::Begin => {
                store.begin();
                Ok(None)
            }
            Self::Commit => store.commit().map(|()| None),
            Self::Rollback => store.rollback().map(|()| None),
        }
    }

    /// Applies the operation to the reference model.
    pub fn apply_model(&self, model: &mut ModelStore) -> Outcome {
        match self {
            Self::Set { key, value } => {
                model.set(key, value);
                Ok(None)
            }
            Self::Get { key } => model.get(key).map(|v| Some(v.to_string())),
            Self::Delete { key } => model.delete(key).map(|()| None),
            Self::Begin => {
                model.begin();
                Ok(None)
            }
            Self::Commit => model.commit().map(|()| None),
            Self::Rollback => model.rollback().map(|()| None),
        }
    }
}

/// Strategy for generating a single operation.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Set { key, value }),
        3 => key_strategy().prop_map(|key| Operation::Get { key }),
        2 => key_strategy().prop_map(|key| Operation::Delete { key }),
        2 => Just(Operation::Begin),
        1 => Just(Operation::Commit),
        1 => Just(Operation::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
