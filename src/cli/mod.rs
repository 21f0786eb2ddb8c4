//! Command-line interface for guidelint.
//!
//! Provides commands for running the validation suite and inspecting the
//! discovered corpus.

mod commands;

pub use commands::{parse_cli, run, run_validation, run_with_cli, Cli, Commands};
