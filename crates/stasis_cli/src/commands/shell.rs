//! Shell command implementation.

use stasis_cli::{Shell, ShellConfig};
use std::io;
use tracing::info;

/// Runs an interactive session on stdin.
pub fn run(config: ShellConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting shell");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    let mut shell = Shell::new(config);
    let report = shell.run(stdin.lock(), &mut out, &mut err)?;

    info!(
        commands = report.commands,
        errors = report.errors,
        "Shell closed"
    );
    Ok(())
}
