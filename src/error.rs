//! Error types for guidelint operations.
//!
//! Scanning and parsing are deliberately soft-failing: an unreadable file
//! is "no signal", not an error. Only subprocess execution and report
//! persistence can fail in ways the caller must see.

use thiserror::Error;

/// Errors that can occur while executing an example snippet.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("IO error while waiting for '{command}': {source}")]
    Wait {
        command: String,
        source: std::io::Error,
    },
}

/// Errors that can occur while rendering or persisting an issue report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report to '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
