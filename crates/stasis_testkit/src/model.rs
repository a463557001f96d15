//! Reference model of the store.
//!
//! [`ModelStore`] keeps a full copy of the visible map for every open
//! transaction. It is slow and memory-hungry, but its behavior is easy to
//! check by eye, which makes it a good oracle for [`stasis_core::Store`].

use stasis_core::{StoreError, StoreResult};
use std::collections::HashMap;

/// A naive store that materializes every transaction level.
#[derive(Debug, Clone)]
pub struct ModelStore {
    /// Visible maps, committed state first. Never empty.
    levels: Vec<HashMap<String, String>>,
}

impl Default for ModelStore {
    fn default() -> Self {
        Self {
            levels: vec![HashMap::new()],
        }
    }
}

impl ModelStore {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a transaction by copying the visible map.
    pub fn begin(&mut self) {
        let top = self.top().clone();
        self.levels.push(top);
    }

    /// Replaces the enclosing level with the innermost one.
    pub fn commit(&mut self) -> StoreResult<()> {
        if self.levels.len() < 2 {
            return Err(StoreError::NoActiveTransaction);
        }
        let top = self.levels.pop().unwrap_or_default();
        *self.top_mut() = top;
        Ok(())
    }

    /// Drops the innermost level.
    pub fn rollback(&mut self) -> StoreResult<()> {
        if self.levels.len() < 2 {
            return Err(StoreError::NoActiveTransaction);
        }
        self.levels.pop();
        Ok(())
    }

    /// Sets a key in the visible map.
    pub fn set(&mut self, key: &str, value: &str) {
        self.top_mut().insert(key.to_string(), value.to_string());
    }

    /// Reads a key from the visible map.
    pub fn get(&self, key: &str) -> StoreResult<&str> {
        self.top()
            .get(key)
            .map(String::as_str)
            .ok_or(StoreError::KeyNotFound)
    }

    /// Removes a key from the visible map.
    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.top_mut()
            .remove(key)
            .map(|_| ())
            .ok_or(StoreError::KeyNotFound)
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the committed map.
    #[must_use]
    pub fn committed(&self) -> &HashMap<String, String> {
        &self.levels[0]
    }

    fn top(&self) -> &HashMap<String, String> {
        &self.levels[self.levels.len() - 1]
    }

    fn top_mut(&mut self) -> &mut HashMap<String, String> {
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }
}
