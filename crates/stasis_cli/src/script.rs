//! Script execution and run summaries.

use crate::config::ShellConfig;
use crate::error::CliResult;
use crate::shell::{SessionReport, Shell};
use serde::Serialize;
use stasis_core::Store;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::info;

/// Summary of a script run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Script path.
    pub script: String,
    /// Lines read.
    pub lines: usize,
    /// Commands executed or rejected.
    pub commands: usize,
    /// Commands that failed.
    pub errors: usize,
    /// Line that stopped the run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<usize>,
    /// Transactions still open at the end of the script.
    pub open_transactions: usize,
    /// Keys in the committed map at the end of the script.
    pub committed_keys: usize,
    /// Store counters.
    pub stats: StatsSummary,
}

/// Store counters as reported in a run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    /// `GET` lookups.
    pub reads: u64,
    /// `SET` writes.
    pub writes: u64,
    /// Successful deletes.
    pub deletes: u64,
    /// Lookups and deletes that found no key.
    pub misses: u64,
    /// Transactions committed.
    pub commits: u64,
    /// Transactions rolled back.
    pub rollbacks: u64,
    /// Deepest nesting reached.
    pub max_depth: u64,
}

impl RunSummary {
    /// Builds a summary from a finished session.
    #[must_use]
    pub fn new(script: &Path, report: &SessionReport, store: &Store) -> Self {
        let stats = store.stats().snapshot();
        Self {
            script: script.display().to_string(),
            lines: report.lines,
            commands: report.commands,
            errors: report.errors,
            stopped_at: report.stopped_at,
            open_transactions: store.depth(),
            committed_keys: store.committed_len(),
            stats: StatsSummary {
                reads: stats.reads,
                writes: stats.writes,
                deletes: stats.deletes,
                misses: stats.misses,
                commits: stats.transactions_committed,
                rollbacks: stats.transactions_rolled_back,
                max_depth: stats.max_depth,
            },
        }
    }

    /// Writes the summary as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_text<W: Write>(&self, out: &mut W) -> CliResult<()> {
        writeln!(out, "Stasis Script Summary")?;
        writeln!(out, "=====================")?;
        writeln!(out)?;
        writeln!(out, "Script: {}", self.script)?;
        writeln!(out)?;
        writeln!(out, "Execution:")?;
        writeln!(out, "  Lines:     {}", self.lines)?;
        writeln!(out, "  Commands:  {}", self.commands)?;
        writeln!(out, "  Errors:    {}", self.errors)?;
        if let Some(line) = self.stopped_at {
            writeln!(out, "  Stopped at line {line}")?;
        }
        writeln!(out)?;
        writeln!(out, "Store:")?;
        writeln!(out, "  Committed keys:     {}", self.committed_keys)?;
        writeln!(out, "  Open transactions:  {}", self.open_transactions)?;
        writeln!(
            out,
            "  Reads/writes/deletes: {}/{}/{}",
            self.stats.reads, self.stats.writes, self.stats.deletes
        )?;
        writeln!(
            out,
            "  Commits/rollbacks:    {}/{}",
            self.stats.commits, self.stats.rollbacks
        )?;
        writeln!(out, "  Max depth:            {}", self.stats.max_depth)?;
        Ok(())
    }

    /// Writes the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_json<W: Write>(&self, out: &mut W) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut *out, self).map_err(std::io::Error::from)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Runs every line of a script file through a fresh shell.
///
/// # Errors
///
/// Returns an error if the file cannot be read or output cannot be
/// written. Failed commands are counted in the summary.
pub fn run_script<W, E>(
    path: &Path,
    config: ShellConfig,
    out: &mut W,
    err: &mut E,
) -> CliResult<RunSummary>
where
    W: Write,
    E: Write,
{
    info!("Running script {:?}", path);
    let file = File::open(path)?;

    let mut shell = Shell::new(config);
    let report = shell.run(BufReader::new(file), out, err)?;

    Ok(RunSummary::new(path, &report, shell.processor().store()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_for(lines: &[&str]) -> RunSummary {
        let mut shell = Shell::new(ShellConfig::new().show_prompt(false));
        let input = lines.join("\n");
        let report = shell
            .run(input.as_bytes(), &mut Vec::new(), &mut Vec::new())
            .unwrap();
        RunSummary::new(Path::new("test.stasis"), &report, shell.processor().store())
    }

    #[test]
    fn summary_counts_store_activity() {
        let summary = summary_for(&["SET a 1", "BEGIN", "SET b 2", "GET a", "GET c", "BEGIN"]);

        assert_eq!(summary.commands, 6);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.open_transactions, 2);
        assert_eq!(summary.committed_keys, 1);
        assert_eq!(summary.stats.reads, 2);
        assert_eq!(summary.stats.misses, 1);
        assert_eq!(summary.stats.max_depth, 2);
    }

    #[test]
    fn json_omits_missing_stop_line() {
        let summary = summary_for(&["SET a 1"]);
        let mut out = Vec::new();
        summary.write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["script"], "test.stasis");
        assert_eq!(value["committed_keys"], 1);
        assert_eq!(value["stats"]["writes"], 1);
        assert!(value.get("stopped_at").is_none());
    }

    #[test]
    fn text_output_names_the_script() {
        let summary = summary_for(&["BEGIN"]);
        let mut out = Vec::new();
        summary.write_text(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Script: test.stasis"));
        assert!(text.contains("Open transactions:  1"));
    }
}
