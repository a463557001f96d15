//! Dispatches parsed commands to the store.

use crate::command::Command;
use crate::error::CliResult;
use stasis_core::Store;
use tracing::debug;

/// The result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The command succeeded and prints nothing.
    Done,
    /// The command produced a value to print.
    Value(String),
    /// The session should end.
    Quit,
}

/// Owns a [`Store`] and executes shell commands against it.
#[derive(Debug, Default)]
pub struct CommandProcessor {
    store: Store,
}

impl CommandProcessor {
    /// Creates a processor over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a processor over an existing store.
    #[must_use]
    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Consumes the processor and returns the store.
    #[must_use]
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Parses and executes one line. Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns a parse error without touching the store, or the store's
    /// error if the operation fails.
    pub fn execute_line(&mut self, line: &str) -> CliResult<Option<Response>> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the operation fails.
    pub fn execute(&mut self, command: Command) -> CliResult<Response> {
        debug!(
            command = command.name(),
            depth = self.store.depth(),
            "executing"
        );

        let response = match command {
            Command::Set { key, value } => {
                self.store.set(key, value);
                Response::Done
            }
            Command::Get { key } => Response::Value(self.store.get(&key)?.to_string()),
            Command::Delete { key } => {
                self.store.delete(&key)?;
                Response::Done
            }
            Command::Begin => {
                self.store.begin();
                Response::Done
            }
            Command::Commit => {
                self.store.commit()?;
                Response::Done
            }
            Command::Rollback => {
                self.store.rollback()?;
                Response::Done
            }
            Command::Quit => Response::Quit,
        };
        Ok(response)
    }
}
