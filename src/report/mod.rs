//! Issue aggregation and report rendering.
//!
//! Failures from all checks accumulate across the whole run (batch
//! reporting, never fail-fast) and render as one grouped, human-readable
//! summary split into documentation and code issues.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::scanner::CODE_EXTENSION;

const RULE: &str = "======================================================================";

/// Which side of the corpus an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Doc,
    Code,
}

/// A single reportable validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// File the issue was found in.
    pub path: PathBuf,
    /// Documentation or code issue, derived from the file extension.
    pub kind: IssueKind,
    /// Per-file-actionable message; never a raw stack trace.
    pub message: String,
}

impl Issue {
    /// Creates an issue, classifying it by the path's extension.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        let path = path.into();
        let kind = if path
            .extension()
            .map(|ext| ext == CODE_EXTENSION)
            .unwrap_or(false)
        {
            IssueKind::Code
        } else {
            IssueKind::Doc
        };
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

/// Aggregated issues for one run, grouped and de-duplicated per file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueReport {
    doc_issues: BTreeMap<String, Vec<String>>,
    code_issues: BTreeMap<String, Vec<String>>,
}

impl IssueReport {
    /// Builds a report from accumulated issues. Paths are rendered
    /// relative to the root where possible; repeated messages per file
    /// are dropped, preserving first occurrence.
    pub fn from_issues(issues: Vec<Issue>, root: &Path) -> Self {
        let mut report = Self::default();

        for issue in issues {
            let display_path = issue
                .path
                .strip_prefix(root)
                .unwrap_or(&issue.path)
                .to_string_lossy()
                .replace('\\', "/");

            let group = match issue.kind {
                IssueKind::Doc => &mut report.doc_issues,
                IssueKind::Code => &mut report.code_issues,
            };
            let messages = group.entry(display_path).or_default();
            if !messages.contains(&issue.message) {
                messages.push(issue.message);
            }
        }

        report
    }

    /// Returns true when no issues were found.
    pub fn is_empty(&self) -> bool {
        self.doc_issues.is_empty() && self.code_issues.is_empty()
    }

    /// Total number of files with at least one issue.
    pub fn total_files(&self) -> usize {
        self.doc_issues.len() + self.code_issues.len()
    }

    /// Renders the fixed-format textual report.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push("ISSUES FOUND".to_string());
        lines.push(RULE.to_string());
        lines.push(String::new());

        if !self.doc_issues.is_empty() {
            lines.push("Documentation Issues:".to_string());
            lines.push(String::new());
            render_group(&mut lines, &self.doc_issues);
        }

        if !self.code_issues.is_empty() {
            lines.push("Python Code Issues:".to_string());
            lines.push(String::new());
            render_group(&mut lines, &self.code_issues);
        }

        lines.push(RULE.to_string());
        lines.push(format!("Total Files with Issues: {}", self.total_files()));
        lines.push(String::new());
        lines.push("For detailed output: guidelint check --log-level debug".to_string());

        lines.join("\n")
    }

    /// Writes the rendered report text verbatim to the given path.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.render()).map_err(|source| ReportError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Serializes the grouped issues as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn render_group(lines: &mut Vec<String>, group: &BTreeMap<String, Vec<String>>) {
    for (path, messages) in group {
        lines.push(format!("  {}", path));
        for message in messages {
            lines.push(format!("    -> {}", message));
        }
        lines.push(String::new());
    }
}
