//! Error types for the Stasis shell.

use stasis_core::StoreError;
use std::io;
use thiserror::Error;

/// Result type for shell operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors reported by the shell.
///
/// `UnknownCommand` and `InvalidArguments` are raised while parsing and
/// never reach the store. The `Display` text is the message shown to the
/// user after the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command name is not recognized.
    #[error("Unknown command.")]
    UnknownCommand,

    /// The command was given the wrong number of arguments.
    #[error("Invalid arguments for command.")]
    InvalidArguments,

    /// The store rejected the operation.
    #[error("{}", store_message(.0))]
    Store(#[from] StoreError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Returns the store error, if the store rejected the operation.
    #[must_use]
    pub fn as_store_error(&self) -> Option<StoreError> {
        match self {
            Self::Store(err) => Some(*err),
            _ => None,
        }
    }
}

fn store_message(err: &StoreError) -> &'static str {
    match err {
        StoreError::KeyNotFound => "Key not found.",
        StoreError::NoActiveTransaction => "No active transaction.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_shell_output() {
        assert_eq!(CliError::UnknownCommand.to_string(), "Unknown command.");
        assert_eq!(
            CliError::InvalidArguments.to_string(),
            "Invalid arguments for command."
        );
        assert_eq!(
            CliError::from(StoreError::KeyNotFound).to_string(),
            "Key not found."
        );
        assert_eq!(
            CliError::from(StoreError::NoActiveTransaction).to_string(),
            "No active transaction."
        );
    }

    #[test]
    fn as_store_error_only_for_store_failures() {
        assert_eq!(
            CliError::Store(StoreError::KeyNotFound).as_store_error(),
            Some(StoreError::KeyNotFound)
        );
        assert_eq!(CliError::UnknownCommand.as_store_error(), None);
    }
}
