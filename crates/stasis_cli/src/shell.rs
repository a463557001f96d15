//! Line-oriented shell session.

use crate::config::ShellConfig;
use crate::error::CliResult;
use crate::processor::{CommandProcessor, Response};
use std::io::{BufRead, Write};
use tracing::debug;

/// Counts gathered over one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Lines read, blank lines included.
    pub lines: usize,
    /// Non-blank lines executed or rejected.
    pub commands: usize,
    /// Commands that failed.
    pub errors: usize,
    /// Line number of the failure that ended the session, if any.
    pub stopped_at: Option<usize>,
    /// Whether the session ended with `QUIT`.
    pub quit: bool,
}

/// A shell reading commands line by line.
///
/// Values printed by `GET` go to `out`; failures are written to `err` as
/// `Error: <message>` and do not end the session unless
/// [`ShellConfig::stop_on_error`] is set.
#[derive(Debug, Default)]
pub struct Shell {
    config: ShellConfig,
    processor: CommandProcessor,
}

impl Shell {
    /// Creates a shell over an empty store.
    #[must_use]
    pub fn new(config: ShellConfig) -> Self {
        Self::with_processor(config, CommandProcessor::new())
    }

    /// Creates a shell over an existing processor.
    #[must_use]
    pub fn with_processor(config: ShellConfig, processor: CommandProcessor) -> Self {
        Self { config, processor }
    }

    /// Returns the session's processor.
    #[must_use]
    pub fn processor(&self) -> &CommandProcessor {
        &self.processor
    }

    /// Reads and executes lines until end of input or `QUIT`.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    /// Command failures are reported on `err` and counted.
    pub fn run<R, W, E>(&mut self, mut input: R, out: &mut W, err: &mut E) -> CliResult<SessionReport>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut report = SessionReport::default();
        let mut buf = Vec::new();

        loop {
            if self.config.show_prompt {
                write!(out, "{}", self.config.prompt)?;
                out.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            report.lines += 1;
            // Invalid UTF-8 is replaced rather than ending the session.
            let line = String::from_utf8_lossy(&buf);

            match self.processor.execute_line(&line) {
                Ok(None) => {}
                Ok(Some(Response::Quit)) => {
                    report.quit = true;
                    break;
                }
                Ok(Some(Response::Value(value))) => {
                    report.commands += 1;
                    writeln!(out, "{value}")?;
                }
                Ok(Some(Response::Done)) => report.commands += 1,
                Err(e) => {
                    report.commands += 1;
                    report.errors += 1;
                    writeln!(err, "Error: {e}")?;
                    if self.config.stop_on_error {
                        report.stopped_at = Some(report.lines);
                        break;
                    }
                }
            }
        }

        out.flush()?;
        debug!(
            lines = report.lines,
            commands = report.commands,
            errors = report.errors,
            "session ended"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: ShellConfig, input: &str) -> (SessionReport, String, String) {
        let mut shell = Shell::new(config);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let report = shell.run(input.as_bytes(), &mut out, &mut err).unwrap();
        (
            report,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn prints_values_and_errors() {
        let input = "SET a 1\nGET a\nGET b\nCOMMIT\n";
        let (report, out, err) = run(ShellConfig::new().show_prompt(false), input);

        assert_eq!(out, "1\n");
        assert_eq!(err, "Error: Key not found.\nError: No active transaction.\n");
        assert_eq!(report.commands, 4);
        assert_eq!(report.errors, 2);
        assert!(!report.quit);
    }

    #[test]
    fn prompt_is_written_before_each_read() {
        let (_, out, _) = run(ShellConfig::new(), "SET a 1\nGET a\n");
        assert_eq!(out, "> > 1\n> ");
    }

    #[test]
    fn quit_stops_reading() {
        let (report, out, _) = run(
            ShellConfig::new().show_prompt(false),
            "SET a 1\nQUIT\nGET a\n",
        );
        assert!(report.quit);
        assert_eq!(report.lines, 2);
        assert!(out.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (report, _, err) = run(ShellConfig::new().show_prompt(false), "\n  \nBEGIN\n");
        assert_eq!(report.lines, 3);
        assert_eq!(report.commands, 1);
        assert!(err.is_empty());
    }

    #[test]
    fn stop_on_error_ends_session() {
        let (report, out, err) = run(ShellConfig::script(), "SET a 1\nFOO\nGET a\n");
        assert_eq!(report.stopped_at, Some(2));
        assert_eq!(err, "Error: Unknown command.\n");
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_utf8_line_does_not_end_session() {
        let mut shell = Shell::new(ShellConfig::new().show_prompt(false));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input: &[u8] = b"SET a 1\nGET \xff\nGET a\nSET \xfe\nGET a\n";
        let report = shell.run(input, &mut out, &mut err).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1\n1\n");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Error: Key not found.\nError: Invalid arguments for command.\n"
        );
        assert_eq!(report.lines, 5);
        assert_eq!(report.errors, 2);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (report, out, err) = run(
            ShellConfig::new().show_prompt(false),
            "SET a 1\r\nGET a\r\n\r\nBEGIN\r\n",
        );

        assert_eq!(out, "1\n");
        assert_eq!(err, "");
        assert_eq!(report.commands, 3);
        assert_eq!(shell_depth_after("BEGIN\r\nBEGIN\r\n"), 2);
    }

    fn shell_depth_after(input: &str) -> usize {
        let mut shell = Shell::new(ShellConfig::new().show_prompt(false));
        shell
            .run(input.as_bytes(), &mut Vec::<u8>::new(), &mut Vec::<u8>::new())
            .unwrap();
        shell.processor().store().depth()
    }
}
