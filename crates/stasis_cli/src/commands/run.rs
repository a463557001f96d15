//! Run command implementation.

use stasis_cli::{run_script, ShellConfig};
use std::io;
use std::path::Path;

/// Executes a script file and prints its summary.
pub fn run(path: &Path, config: ShellConfig, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No script found at {:?}", path).into());
    }

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let summary = run_script(path, config, &mut out, &mut err)?;

    match format {
        "json" => summary.write_json(&mut out)?,
        _ => summary.write_text(&mut out)?,
    }

    if let Some(line) = summary.stopped_at {
        return Err(format!("script stopped at line {line}").into());
    }
    Ok(())
}
