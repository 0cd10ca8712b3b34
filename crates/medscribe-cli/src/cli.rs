//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Medscribe CLI - Extract structured medical entities from document text.
#[derive(Debug, Parser)]
#[command(name = "medscribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MEDSCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable tables (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract entities from a text file or stdin
    Extract(ExtractArgs),

    /// List the recognition rules of the pattern library
    Patterns(PatternsArgs),

    /// Run a mock upload through transcription, extraction and review
    Demo(DemoArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text file to read, or '-' for stdin
    pub input: String,
}

/// Arguments for the patterns command.
#[derive(Debug, Parser)]
pub struct PatternsArgs {
    /// Only list rules for this kind (e.g. medication, vital:bloodPressure)
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Arguments for the demo command.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Document category to simulate
    #[arg(long, default_value = "consultation")]
    pub category: String,

    /// Patient identifier
    #[arg(short, long, default_value = "demo-patient")]
    pub patient: String,

    /// Confirm the proposal and commit it to the in-memory record
    #[arg(long)]
    pub confirm: bool,

    /// Name recorded as the confirming reviewer
    #[arg(short, long, default_value = "demo reviewer")]
    pub reviewer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from(["medscribe", "extract", "note.txt", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(matches!(cli.command, Command::Extract(ExtractArgs { ref input }) if input == "note.txt"));
    }

    #[test]
    fn test_parse_demo_defaults() {
        let cli = Cli::try_parse_from(["medscribe", "demo"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        assert_eq!(args.category, "consultation");
        assert!(!args.confirm);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["medscribe"]).is_err());
    }
}
