//! Expected-outcome markers in example snippets.
//!
//! Snippets that intentionally hang, fail or raise declare it with a
//! directive comment in their header:
//!
//! - `# EXPECTED_TIMEOUT`
//! - `# EXPECTED_FAILURE: <reason>`
//! - `# EXPECTED_ERROR: <error_type>`
//!
//! Only the first 10 lines of a file are inspected; a marker appearing
//! later does not count. Unreadable files are treated as having no
//! marker.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Number of leading lines scanned for a marker.
pub const MARKER_SCAN_LINES: usize = 10;

const TIMEOUT_DIRECTIVE: &str = "# EXPECTED_TIMEOUT";
const FAILURE_DIRECTIVE: &str = "# EXPECTED_FAILURE";
const ERROR_DIRECTIVE: &str = "# EXPECTED_ERROR";

/// Declared expectation of an abnormal outcome for one snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedOutcome {
    /// The snippet is expected to exceed the execution timeout.
    Timeout,
    /// The snippet is expected to fail, with a free-text reason.
    Failure(String),
    /// The snippet is expected to raise a specific error type.
    Error(String),
}

impl ExpectedOutcome {
    /// The directive label as written in the snippet header.
    pub fn label(&self) -> &'static str {
        match self {
            ExpectedOutcome::Timeout => "EXPECTED_TIMEOUT",
            ExpectedOutcome::Failure(_) => "EXPECTED_FAILURE",
            ExpectedOutcome::Error(_) => "EXPECTED_ERROR",
        }
    }

    /// The reason/type payload; empty for timeouts and bare markers.
    pub fn reason(&self) -> &str {
        match self {
            ExpectedOutcome::Timeout => "",
            ExpectedOutcome::Failure(reason) => reason,
            ExpectedOutcome::Error(error_type) => error_type,
        }
    }
}

/// Parses the expected-outcome marker from the first 10 lines of a file.
///
/// The first matching line wins. Returns `None` when no marker is found
/// or the file cannot be read (fail soft).
pub fn parse_marker(path: &Path) -> Option<ExpectedOutcome> {
    let file = File::open(path).ok()?;
    let reader = BufReader::new(file);

    for line in reader.lines().take(MARKER_SCAN_LINES) {
        let line = line.ok()?;
        let line = line.trim();

        if line.starts_with(TIMEOUT_DIRECTIVE) {
            return Some(ExpectedOutcome::Timeout);
        }
        if let Some(rest) = line.strip_prefix(FAILURE_DIRECTIVE) {
            if rest.is_empty() || rest.starts_with(':') {
                return Some(ExpectedOutcome::Failure(directive_payload(rest)));
            }
        }
        if let Some(rest) = line.strip_prefix(ERROR_DIRECTIVE) {
            if rest.is_empty() || rest.starts_with(':') {
                return Some(ExpectedOutcome::Error(directive_payload(rest)));
            }
        }
    }

    None
}

/// Extracts the text after the directive's colon, if any.
fn directive_payload(rest: &str) -> String {
    rest.strip_prefix(':')
        .map(|payload| payload.trim().to_string())
        .unwrap_or_default()
}

/// Returns true if the file declares an `EXPECTED_TIMEOUT` marker.
pub fn should_expect_timeout(path: &Path) -> bool {
    matches!(parse_marker(path), Some(ExpectedOutcome::Timeout))
}

/// Returns true if the file declares an `EXPECTED_FAILURE` or
/// `EXPECTED_ERROR` marker.
pub fn should_expect_failure(path: &Path) -> bool {
    matches!(
        parse_marker(path),
        Some(ExpectedOutcome::Failure(_)) | Some(ExpectedOutcome::Error(_))
    )
}

/// Returns the marker's reason text, or an empty string without a marker.
pub fn expected_reason(path: &Path) -> String {
    parse_marker(path)
        .map(|marker| marker.reason().to_string())
        .unwrap_or_default()
}
