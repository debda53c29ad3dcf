//! Command-line interface for barrier-tree analyses.
//!
//! The `run` command reads a sorted energy listing, floods it through the
//! selected move-set landscape and writes the basin report, an optional saddle
//! log and any requested path files.

mod commands;
mod report;

pub use commands::{BasinPair, Cli, CliError, Command, ExecutionSummary, RunCommand, run_cli};
pub use report::{render_path, render_report};

#[cfg(test)]
mod tests;
