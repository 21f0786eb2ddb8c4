//! Interpreter subprocess management.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::config::CheckConfig;
use crate::error::ExecError;

use super::ExecOutcome;

/// Interpreter flags elevating deprecation warnings to errors.
const WARNING_FLAGS: &[&str] = &[
    "-W",
    "error::DeprecationWarning",
    "-W",
    "error::PendingDeprecationWarning",
];

/// Inline probe that parses a file without executing it.
const SYNTAX_PROBE: &str = "\
import ast, sys
with open(sys.argv[1], encoding='utf-8') as handle:
    ast.parse(handle.read(), filename=sys.argv[1])
";

/// Runs example snippets as isolated interpreter subprocesses.
pub struct Executor {
    python_bin: String,
    timeout: Duration,
}

impl Executor {
    /// Creates an executor from the run configuration.
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            python_bin: config.python_bin.clone(),
            timeout: config.timeout,
        }
    }

    /// The configured per-snippet timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Executes a snippet with deprecation warnings elevated to errors.
    pub async fn run_checked(&self, file: &Path) -> Result<ExecOutcome, ExecError> {
        self.run(WARNING_FLAGS, file).await
    }

    /// Executes a snippet without warning flags (for output validation).
    pub async fn run_plain(&self, file: &Path) -> Result<ExecOutcome, ExecError> {
        self.run(&[], file).await
    }

    /// Parses a snippet without executing it. Returns `Some(message)` on
    /// a syntax error, `None` when the file parses cleanly.
    pub async fn check_syntax(&self, file: &Path) -> Result<Option<String>, ExecError> {
        let outcome = self.run(&["-c", SYNTAX_PROBE], file).await?;
        match outcome {
            ExecOutcome::Completed { exit_code: 0, .. } => Ok(None),
            ExecOutcome::Completed { stderr, .. } => {
                let detail = stderr
                    .lines()
                    .rev()
                    .find(|line| !line.trim().is_empty())
                    .unwrap_or("unknown parse error")
                    .trim()
                    .to_string();
                Ok(Some(detail))
            }
            ExecOutcome::TimedOut => Ok(Some("syntax check timed out".to_string())),
        }
    }

    /// Spawns the interpreter with the file's own directory as the
    /// working directory, bounded by the configured timeout. The child
    /// is killed when the timeout cancels the wait.
    async fn run(&self, flags: &[&str], file: &Path) -> Result<ExecOutcome, ExecError> {
        // Absolute paths survive the working-directory change below.
        let file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());

        let mut command = Command::new(&self.python_bin);
        command.args(flags);
        command.arg(&file);
        if let Some(parent) = file.parent() {
            if !parent.as_os_str().is_empty() {
                command.current_dir(parent);
            }
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| ExecError::Spawn {
            command: self.python_bin.clone(),
            source,
        })?;

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ExecOutcome::Completed {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
            Ok(Err(source)) => Err(ExecError::Wait {
                command: self.python_bin.clone(),
                source,
            }),
            Err(_) => {
                debug!("Killed {} after {:?} timeout", file.display(), self.timeout);
                Ok(ExecOutcome::TimedOut)
            }
        }
    }
}
