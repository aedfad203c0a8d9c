//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand, ValueEnum};

/// Service Kit - run transactional service objects from the command line
#[derive(Parser, Debug)]
#[command(name = "service-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the tables used by the example services
    Schema,

    /// Run one service with a JSON argument bag
    Run(RunArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Service to run
    #[arg(value_enum)]
    pub service: ServiceName,

    /// Argument bag as a JSON object
    #[arg(short, long, default_value = "{}")]
    pub args: String,
}

/// Services reachable from the CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceName {
    CreateAccount,
    RenameAccount,
    ImportAccounts,
}
