//! node-lint CLI tool.
//!
//! Usage:
//! ```bash
//! node-lint check [OPTIONS] [PATH]
//! node-lint list-rules
//! node-lint init
//! ```
//!
//! Exit status: 0 when clean, 1 when violations were found, 2 when the run
//! could not complete (missing source directory, bad config, I/O error).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter for C++ Node subclasses
#[derive(Parser)]
#[command(name = "node-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Project directory: holds node-lint.toml and the default `src` root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Source directory to scan (default: `analyzer.root` from config, else `src`)
        #[arg(long)]
        src: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `file:line: [rule] message`, one per line, summary on stderr.
    #[default]
    Text,
    /// Multi-line blocks with codes and help.
    Compact,
    /// JSON output.
    Json,
    /// Annotated source snippets.
    Pretty,
}

/// Outcome of a command that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// Lint violations were found.
    Violations,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Violations) => ExitCode::from(1),
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Commands::Check {
            path,
            src,
            format,
            rules,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&commands::check::CheckArgs {
                project: path,
                src,
                format,
                rules,
                exclude,
                source,
            })
        }
        Commands::ListRules => {
            commands::list_rules::run()?;
            Ok(Outcome::Clean)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(Outcome::Clean)
        }
    }
}
