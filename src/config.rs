//! Configuration for validation runs.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default interpreter used to execute example snippets.
pub const DEFAULT_PYTHON_BIN: &str = "python3";

/// Default wall-clock timeout per executed snippet.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default file the rendered report is persisted to.
pub const DEFAULT_REPORT_FILE: &str = "KNOWN_ISSUES.md";

/// Configuration for a single validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Root of the guide tree to validate.
    pub root: PathBuf,
    /// Interpreter binary used to run snippets.
    pub python_bin: String,
    /// Maximum execution time per snippet.
    pub timeout: Duration,
    /// Whether snippets are executed at all (false = static checks only).
    pub execute: bool,
    /// Path the report is saved to when persistence is requested.
    pub report_path: PathBuf,
}

impl CheckConfig {
    /// Creates a new configuration with defaults for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            python_bin: DEFAULT_PYTHON_BIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            execute: true,
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }

    /// Sets the interpreter binary.
    pub fn with_python_bin(mut self, bin: impl Into<String>) -> Self {
        self.python_bin = bin.into();
        self
    }

    /// Sets the per-snippet timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables snippet execution (static checks only).
    pub fn without_execution(mut self) -> Self {
        self.execute = false;
        self
    }

    /// Sets the report output path.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
