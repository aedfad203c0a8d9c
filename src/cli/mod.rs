//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `schema` - Create example tables
//! - `run` - Run a service from a JSON argument bag

pub mod args;

pub use args::{Cli, Commands};
