//! cstyle CLI tool.
//!
//! Usage:
//! ```bash
//! cstyle [OPTIONS] [FILES]...
//! cstyle --dir src --recursive --output report.txt
//! cstyle list-rules
//! cstyle init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discovery;

use commands::check::CheckArgs;

/// Coding standards linter for C source and header files
#[derive(Parser)]
#[command(name = "cstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    check: CheckArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
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
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The grouped text report.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::ListRules) => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Init { force }) => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
        None => commands::check::run(&cli.check, cli.config.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from([
            "cstyle", "-d", "src", "-r", "-f", "compact", "--rules", "CS001", "a.c", "b.h",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.check.dir, Some(PathBuf::from("src")));
        assert!(cli.check.recursive);
        assert_eq!(cli.check.format, OutputFormat::Compact);
        assert_eq!(cli.check.files, vec![PathBuf::from("a.c"), PathBuf::from("b.h")]);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["cstyle", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));

        let cli = Cli::try_parse_from(["cstyle", "-v", "list-rules"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::ListRules)));
    }
}
