//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cotejador: CLI for Cotejar - visual-regression baseline management
#[derive(Parser, Debug)]
#[command(name = "cotejador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Root directory of the baseline store
    #[arg(long, default_value = "visual-baselines", global = true)]
    pub root: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record or overwrite the approved baseline for a configuration
    Update(UpdateArgs),

    /// Compare a captured image against its approved baseline
    Compare(CompareArgs),

    /// Audit the store: classify baselines as valid, invalid, or missing
    Validate(ValidateArgs),

    /// List recorded baselines
    List(ListArgs),

    /// Print the standard configuration matrix
    Matrix(MatrixArgs),

    /// Delete transient comparison artifacts between runs
    Cleanup,
}

/// Arguments for the update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Configuration name, e.g. portfolio-history-portrait-16x9-light
    pub name: String,

    /// Captured image to record as the approved baseline
    pub image: PathBuf,
}

/// Arguments for the compare command
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Configuration name, e.g. portfolio-history-portrait-16x9-light
    pub name: String,

    /// Freshly captured image to compare
    pub image: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the matrix command
#[derive(Parser, Debug)]
pub struct MatrixArgs {
    /// Base URL the navigation URLs are built against
    #[arg(long, default_value = "http://localhost:4321")]
    pub base_url: String,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for reporting commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from([
            "cotejador",
            "compare",
            "portfolio-history-portrait-16x9-light",
            "shot.png",
        ]);
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.name, "portfolio-history-portrait-16x9-light");
                assert_eq!(args.image, PathBuf::from("shot.png"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_root_default() {
        let cli = Cli::parse_from(["cotejador", "cleanup"]);
        assert_eq!(cli.root, PathBuf::from("visual-baselines"));
    }

    #[test]
    fn test_matrix_format_flag() {
        let cli = Cli::parse_from(["cotejador", "matrix", "--format", "json"]);
        match cli.command {
            Commands::Matrix(args) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
