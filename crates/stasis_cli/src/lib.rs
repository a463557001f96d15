//! # Stasis CLI
//!
//! Line-oriented front end for the Stasis store.
//!
//! Each input line is one command:
//!
//! ```text
//! SET key value
//! GET key
//! DELETE key
//! BEGIN
//! COMMIT
//! ROLLBACK
//! QUIT
//! ```
//!
//! Malformed lines are rejected here and never reach the store.
//!
//! ## Example
//!
//! ```rust
//! use stasis_cli::{Shell, ShellConfig};
//!
//! let mut shell = Shell::new(ShellConfig::new().show_prompt(false));
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! shell.run("SET a 1\nGET a\nGET b\n".as_bytes(), &mut out, &mut err)?;
//!
//! assert_eq!(out, b"1\n");
//! assert_eq!(err, b"Error: Key not found.\n");
//! # Ok::<(), stasis_cli::CliError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod processor;
mod script;
mod shell;

pub use command::Command;
pub use config::{ShellConfig, DEFAULT_PROMPT};
pub use error::{CliError, CliResult};
pub use processor::{CommandProcessor, Response};
pub use script::{run_script, RunSummary, StatsSummary};
pub use shell::{SessionReport, Shell};
