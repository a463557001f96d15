//! Command-line parsing.

use crate::error::{CliError, CliResult};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `DELETE key`
    Delete {
        /// Key to delete.
        key: String,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `QUIT`
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Tokens are separated by whitespace and command names are matched
    /// exactly. Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownCommand`] for an unrecognized name and
    /// [`CliError::InvalidArguments`] for a wrong argument count.
    pub fn parse(line: &str) -> CliResult<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match name {
            "SET" => match args.as_slice() {
                [key, value] => Self::Set {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                },
                _ => return Err(CliError::InvalidArguments),
            },
            "GET" => Self::Get {
                key: single_arg(&args)?,
            },
            "DELETE" => Self::Delete {
                key: single_arg(&args)?,
            },
            "BEGIN" => no_args(&args, Self::Begin)?,
            "COMMIT" => no_args(&args, Self::Commit)?,
            "ROLLBACK" => no_args(&args, Self::Rollback)?,
            // Trailing tokens after QUIT are ignored.
            "QUIT" => Self::Quit,
            _ => return Err(CliError::UnknownCommand),
        };

        Ok(Some(command))
    }

    /// Returns the command's keyword.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Delete { .. } => "DELETE",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Quit => "QUIT",
        }
    }
}

fn single_arg(args: &[&str]) -> CliResult<String> {
    match args {
        [key] => Ok((*key).to_string()),
        _ => Err(CliError::InvalidArguments),
    }
}

fn no_args(args: &[&str], command: Command) -> CliResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CliError::InvalidArguments)
    }
}
