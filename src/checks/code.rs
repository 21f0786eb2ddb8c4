//! Runtime and syntax validation of example snippets.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::markers::{parse_marker, ExpectedOutcome};
use crate::output::{extract_expected_output, match_output};
use crate::report::Issue;
use crate::runner::{classify, ExecOutcome, Executor};
use crate::scanner::DOC_FILENAME;

/// Validates one snippet: syntax, deprecation/timeout reconciliation
/// against its marker, and (when documented) expected output. Checks are
/// independent; all issues found are returned together.
pub async fn check_code(executor: &Executor, file: &Path) -> Vec<Issue> {
    let mut issues = Vec::new();
    let marker = parse_marker(file);

    match executor.check_syntax(file).await {
        Ok(Some(detail)) => {
            issues.push(Issue::new(file, format!("Syntax error: {}", detail)));
        }
        Ok(None) => {}
        Err(err) => {
            debug!("Syntax check unavailable for {}: {}", file.display(), err);
            issues.push(Issue::new(file, format!("Failed to run interpreter: {}", err)));
            // Without an interpreter the remaining checks cannot run.
            return issues;
        }
    }

    issues.extend(deprecation_issue(executor, file, marker.as_ref()).await);
    issues.extend(output_issue(executor, file, marker.as_ref()).await);

    issues
}

/// Executes the snippet with warnings-as-errors and reconciles the
/// outcome against the marker.
async fn deprecation_issue(
    executor: &Executor,
    file: &Path,
    marker: Option<&ExpectedOutcome>,
) -> Option<Issue> {
    match executor.run_checked(file).await {
        Ok(outcome) => {
            classify(&outcome, marker, executor.timeout()).map(|message| Issue::new(file, message))
        }
        Err(err) => {
            // Failure to execute at all counts as an expected failure
            // when a marker is present; otherwise it is reportable.
            if marker.is_some() {
                None
            } else {
                Some(Issue::new(file, format!("Failed to execute: {}", err)))
            }
        }
    }
}

/// Validates the snippet's captured output against the expected-output
/// block documented in the sibling article, when one exists. Snippets
/// with markers are skipped: their output is abnormal by declaration.
async fn output_issue(
    executor: &Executor,
    file: &Path,
    marker: Option<&ExpectedOutcome>,
) -> Option<Issue> {
    if marker.is_some() {
        return None;
    }

    let doc_path = file.parent()?.join(DOC_FILENAME);
    let content = fs::read_to_string(&doc_path).ok()?;
    let expected_outputs = extract_expected_output(&content);
    let filename = file.file_name()?.to_string_lossy().to_string();
    let expected = expected_outputs.get(&filename)?;

    match executor.run_plain(file).await {
        Ok(ExecOutcome::Completed { stdout, stderr, .. }) => {
            let mut actual = stdout.trim().to_string();
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                actual.push('\n');
                actual.push_str(stderr);
            }

            let result = match_output(&actual, expected);
            if result.matched {
                debug!("{}: {}", file.display(), result.detail);
                None
            } else {
                Some(Issue::new(file, result.detail))
            }
        }
        Ok(ExecOutcome::TimedOut) => Some(Issue::new(
            file,
            format!(
                "Execution timeout ({}s); cannot validate output",
                executor.timeout().as_secs()
            ),
        )),
        Err(err) => Some(Issue::new(file, format!("Failed to execute: {}", err))),
    }
}
