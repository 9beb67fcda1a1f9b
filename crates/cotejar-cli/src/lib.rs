//! Cotejador: CLI for Cotejar baseline management
//!
//! ## Usage
//!
//! ```bash
//! cotejador matrix                          # Print the standard config matrix
//! cotejador update <name> <image>           # Record an approved baseline
//! cotejador compare <name> <image>          # Compare a capture against it
//! cotejador validate --format json          # Audit store integrity
//! cotejador cleanup                         # Drop transient comparison files
//! ```

#![warn(missing_docs)]

/// CLI command definitions
pub mod commands;
/// CLI error types
pub mod error;
/// Output rendering
pub mod output;

pub use commands::{
    Cli, Commands, CompareArgs, ListArgs, MatrixArgs, OutputFormat, UpdateArgs, ValidateArgs,
};
pub use error::{CliError, CliResult};
