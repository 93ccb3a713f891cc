//! Tooling Layer
//!
//! Command-line surface and output formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, InsightCommands};
