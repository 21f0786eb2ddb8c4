//! guidelint: validation harness for a secure-coding example corpus.
//!
//! This library validates a directory tree of paired "non-compliant" and
//! "compliant" Python example snippets together with their per-topic
//! README articles: snippet syntax and runtime behavior, documentation
//! structure, cross-references between the two, and expected-output
//! blocks.

// Core modules
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod markdown;
pub mod markers;
pub mod output;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod session;

// Re-export commonly used error types
pub use error::{ExecError, ReportError};
