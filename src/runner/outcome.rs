//! Execution outcomes and marker reconciliation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::markers::ExpectedOutcome;

/// Outcome of executing one snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExecOutcome {
    /// The process ran to completion within the timeout.
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    /// The process exceeded the wall-clock timeout and was killed.
    TimedOut,
}

impl ExecOutcome {
    /// Returns true for a clean zero-exit completion.
    pub fn is_clean_success(&self) -> bool {
        matches!(self, ExecOutcome::Completed { exit_code: 0, .. })
    }

    /// Returns true when a non-zero exit was caused by a deprecation
    /// warning elevated to an error.
    pub fn is_deprecation_failure(&self) -> bool {
        match self {
            ExecOutcome::Completed {
                exit_code, stderr, ..
            } => {
                *exit_code != 0
                    && (stderr.contains("DeprecationWarning")
                        || stderr.contains("PendingDeprecationWarning"))
            }
            ExecOutcome::TimedOut => false,
        }
    }
}

/// Reconciles an execution outcome against the snippet's marker.
///
/// Returns `Some(issue)` for a reportable failure, `None` when the
/// outcome is acceptable. The policy deliberately fails only on
/// unexpected deprecation warnings and unexpected timeouts: many demo
/// snippets raise or exit non-zero on purpose to illustrate an exploit,
/// so other non-zero exits pass with or without a marker. The inverse
/// also holds: a marker on a snippet that now succeeds cleanly is itself
/// a failure, so stale markers cannot accumulate.
pub fn classify(
    outcome: &ExecOutcome,
    marker: Option<&ExpectedOutcome>,
    timeout: Duration,
) -> Option<String> {
    let expects_abnormal = marker.is_some();

    match outcome {
        ExecOutcome::TimedOut => {
            if expects_abnormal {
                None
            } else {
                Some(format!(
                    "Execution timeout ({}s); the file may contain an infinite loop or blocking operation",
                    timeout.as_secs()
                ))
            }
        }
        outcome if outcome.is_deprecation_failure() => {
            if expects_abnormal {
                None
            } else {
                Some("DeprecationWarning detected".to_string())
            }
        }
        ExecOutcome::Completed { exit_code: 0, .. } => marker.map(|marker| {
            let reason = if marker.reason().is_empty() {
                String::new()
            } else {
                format!(" ({})", marker.reason())
            };
            format!(
                "{} marker present{} but execution succeeded; the issue may have been fixed - remove the marker",
                marker.label(),
                reason
            )
        }),
        // Any other non-zero exit is acceptable: demo snippets often
        // raise deliberately.
        ExecOutcome::Completed { .. } => None,
    }
}
