//! Stasis CLI
//!
//! Interactive shell and script runner for the Stasis key-value store.
//!
//! # Commands
//!
//! - `shell` - Read commands from stdin (the default)
//! - `run` - Execute a script file and print a summary
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use stasis_cli::{ShellConfig, DEFAULT_PROMPT};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Stasis nested-transaction key-value shell.
#[derive(Parser)]
#[command(name = "stasis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Do not print a prompt before each line
    #[arg(global = true, long)]
    no_prompt: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin until QUIT or end of input
    Shell {
        /// Prompt printed before each line
        #[arg(short, long, default_value = DEFAULT_PROMPT)]
        prompt: String,
    },

    /// Execute a script file, one command per line
    Run {
        /// Path to the script
        file: PathBuf,

        /// Summary format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Keep executing after a failed command
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Show version information
    Version,
}

/// Log level used when `RUST_LOG` is unset.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Shell {
        prompt: DEFAULT_PROMPT.to_string(),
    });

    match command {
        Commands::Shell { prompt } => {
            let config = ShellConfig::new()
                .prompt(prompt)
                .show_prompt(!cli.no_prompt);
            commands::shell::run(config)?;
        }
        Commands::Run {
            file,
            format,
            keep_going,
        } => {
            let config = ShellConfig::script().stop_on_error(!keep_going);
            commands::run::run(&file, config, &format)?;
        }
        Commands::Version => {
            println!("Stasis CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Stasis Core v{}", stasis_core::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_selects_debug_level() {
        assert_eq!(default_log_level(true), "debug");
        assert_eq!(default_log_level(false), "warn");
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["stasis", "run", "script.txt", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Run { keep_going: false, .. })));
    }
}
