//! End-to-end tests for shell sessions and script runs.

use stasis_cli::{run_script, Shell, ShellConfig};
use std::io::Write;
use tempfile::NamedTempFile;

/// Runs `input` through a prompt-less shell and returns (stdout, stderr).
fn transcript(input: &str) -> (String, String) {
    let mut shell = Shell::new(ShellConfig::new().show_prompt(false));
    let mut out = Vec::new();
    let mut err = Vec::new();
    shell.run(input.as_bytes(), &mut out, &mut err).unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn script(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn nested_transactions_session() {
    let (out, err) = transcript(
        "SET outer v1\n\
         BEGIN\n\
         SET outer v2\n\
         SET inner v3\n\
         BEGIN\n\
         SET inner v4\n\
         COMMIT\n\
         GET inner\n\
         GET outer\n\
         ROLLBACK\n\
         GET outer\n\
         GET inner\n",
    );

    assert_eq!(out, "v4\nv2\nv1\n");
    assert_eq!(err, "Error: Key not found.\n");
}

#[test]
fn delete_survives_two_commits() {
    let (out, err) = transcript(
        "SET k v0\nBEGIN\nDELETE k\nBEGIN\nGET k\nCOMMIT\nCOMMIT\nGET k\nCOMMIT\n",
    );

    assert!(out.is_empty());
    assert_eq!(
        err,
        "Error: Key not found.\nError: Key not found.\nError: No active transaction.\n"
    );
}

#[test]
fn malformed_input_is_reported_and_session_continues() {
    let (out, err) = transcript("SET a\nFETCH a\nBEGIN 1\nSET a 1\nGET a\n");

    assert_eq!(out, "1\n");
    assert_eq!(
        err,
        "Error: Invalid arguments for command.\n\
         Error: Unknown command.\n\
         Error: Invalid arguments for command.\n"
    );
}

#[test]
fn script_run_collects_summary() {
    let file = script(&["SET a 1", "BEGIN", "SET b 2", "DELETE a", "COMMIT", "GET b"]);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let summary = run_script(file.path(), ShellConfig::script(), &mut out, &mut err).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "2\n");
    assert!(err.is_empty());
    assert_eq!(summary.commands, 6);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.stopped_at, None);
    assert_eq!(summary.committed_keys, 1);
    assert_eq!(summary.open_transactions, 0);
    assert_eq!(summary.stats.commits, 1);
}

#[test]
fn script_run_stops_on_first_error() {
    let file = script(&["BEGIN", "ROLLBACK", "ROLLBACK", "SET never 1"]);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let summary = run_script(file.path(), ShellConfig::script(), &mut out, &mut err).unwrap();

    assert_eq!(summary.stopped_at, Some(3));
    assert_eq!(summary.committed_keys, 0);
    assert_eq!(String::from_utf8(err).unwrap(), "Error: No active transaction.\n");
}

#[test]
fn script_run_keep_going() {
    let file = script(&["ROLLBACK", "SET a 1", "GET missing", "GET a"]);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let config = ShellConfig::script().stop_on_error(false);
    let summary = run_script(file.path(), config, &mut out, &mut err).unwrap();

    assert_eq!(summary.errors, 2);
    assert_eq!(summary.stopped_at, None);
    assert_eq!(String::from_utf8(out).unwrap(), "1\n");
}

#[test]
fn missing_script_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_script(
        &dir.path().join("absent.stasis"),
        ShellConfig::script(),
        &mut Vec::new(),
        &mut Vec::new(),
    );

    assert!(matches!(result, Err(stasis_cli::CliError::Io(_))));
}
