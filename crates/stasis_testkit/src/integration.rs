//! Differential checks of [`Store`] against [`ModelStore`].

use crate::generators::{Operation, Outcome};
use crate::model::ModelStore;
use stasis_core::Store;
use std::fmt;

/// The first step at which the store and the model disagreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the operation in the sequence.
    pub step: usize,
    /// The operation applied.
    pub operation: Operation,
    /// What the store returned.
    pub store: Outcome,
    /// What the model returned.
    pub model: Outcome,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: {:?} returned {:?} from the store but {:?} from the model",
            self.step, self.operation, self.store, self.model
        )
    }
}

/// Applies `ops` to a fresh store and a fresh model, comparing every
/// outcome, the depth after every step, and finally every key in `keys`.
///
/// # Errors
///
/// Returns the first [`Divergence`] found.
pub fn check_against_model(ops: &[Operation], keys: &[&str]) -> Result<Store, Divergence> {
    let mut store = Store::new();
    let mut model = ModelStore::new();

    for (step, op) in ops.iter().enumerate() {
        let expected = op.apply_model(&mut model);
        let actual = op.apply(&mut store);
        if actual != expected || store.depth() != model.depth() {
            return Err(Divergence {
                step,
                operation: op.clone(),
                store: actual,
                model: expected,
            });
        }
    }

    for key in keys {
        let op = Operation::Get {
            key: (*key).to_string(),
        };
        let expected = op.apply_model(&mut model);
        let actual = op.apply(&mut store);
        if actual != expected {
            return Err(Divergence {
                step: ops.len(),
                operation: op,
                store: actual,
                model: expected,
            });
        }
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{operation_sequence_strategy, PropTestConfig};
    use proptest::prelude::*;
    use stasis_core::StoreError;

    const KEYS: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn set(key: &str, value: &str) -> Operation {
        Operation::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    fn delete(key: &str) -> Operation {
        Operation::Delete { key: key.into() }
    }

    #[test]
    fn scripted_nested_sequence_matches_model() {
        let ops = vec![
            set("a", "v1"),
            Operation::Begin,
            set("a", "v2"),
            set("b", "v3"),
            Operation::Begin,
            delete("a"),
            set("b", "v4"),
            Operation::Commit,
            Operation::Begin,
            set("a", "v5"),
            Operation::Rollback,
            Operation::Commit,
            Operation::Commit,
        ];
        let store = check_against_model(&ops, &KEYS).unwrap();
        assert_eq!(store.get("a"), Err(StoreError::KeyNotFound));
        assert_eq!(store.get("b"), Ok("v4"));
    }

    #[test]
    fn divergence_display_names_step() {
        let divergence = Divergence {
            step: 3,
            operation: Operation::Commit,
            store: Ok(None),
            model: Err(StoreError::NoActiveTransaction),
        };
        assert!(divergence.to_string().starts_with("step 3: Commit"));
    }

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn store_matches_model(ops in operation_sequence_strategy(0, 64)) {
            if let Err(divergence) = check_against_model(&ops, &KEYS) {
                prop_assert!(false, "{}", divergence);
            }
        }

        #[test]
        fn closing_every_level_leaves_model_state(ops in operation_sequence_strategy(0, 48)) {
            let mut store = Store::new();
            let mut model = ModelStore::new();
            for op in &ops {
                let _ = op.apply(&mut store);
                let _ = op.apply_model(&mut model);
            }
            while store.depth() > 0 {
                prop_assert!(store.commit().is_ok());
                prop_assert!(model.commit().is_ok());
            }
            prop_assert_eq!(store.committed_len(), model.committed().len());
            for (key, value) in model.committed() {
                prop_assert_eq!(store.committed_value(key), Some(value.as_str()));
            }
        }

        #[test]
        fn rollback_restores_previous_view(
            prefix in operation_sequence_strategy(0, 24),
            body in operation_sequence_strategy(0, 24),
        ) {
            let mut store = Store::new();
            for op in &prefix {
                let _ = op.apply(&mut store);
            }
            let before: Vec<_> = KEYS.iter().map(|k| store.get(k).map(str::to_owned)).collect();
            let depth = store.depth();

            store.begin();
            for op in &body {
                // Stay inside the transaction opened above.
                if matches!(op, Operation::Commit | Operation::Rollback) && store.depth() == depth + 1 {
                    continue;
                }
                let _ = op.apply(&mut store);
            }
            while store.depth() > depth + 1 {
                prop_assert!(store.commit().is_ok());
            }
            prop_assert!(store.rollback().is_ok());

            let after: Vec<_> = KEYS.iter().map(|k| store.get(k).map(str::to_owned)).collect();
            prop_assert_eq!(before, after);
            prop_assert_eq!(store.depth(), depth);
        }

        #[test]
        fn failed_delete_never_masks_later_set(
            ops in operation_sequence_strategy(0, 32),
            value in crate::generators::value_strategy(),
        ) {
            let mut store = Store::new();
            for op in &ops {
                let _ = op.apply(&mut store);
            }
            prop_assert_eq!(store.delete("zz"), Err(StoreError::KeyNotFound));
            store.set("zz", value.as_str());
            while store.depth() > 0 {
                prop_assert!(store.commit().is_ok());
            }
            prop_assert_eq!(store.get("zz"), Ok(value.as_str()));
        }
    }
}
