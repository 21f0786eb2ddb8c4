//! End-to-end tests for the validation harness.
//!
//! Each test builds a synthetic guide tree in a temp directory and runs
//! the full validation over it. Tests that execute snippets skip
//! themselves when no python3 interpreter is on PATH.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use guidelint::cli::run_validation;
use guidelint::config::CheckConfig;

const COMPLETE_DOC: &str = "\
# CWE-502: Deserialization of Untrusted Data

Never unpickle data from an untrusted source.

## Non-Compliant Code Example

*[noncompliant01.py](noncompliant01.py):*
```python
print(\"loading whatever arrives on the wire\")
```

## Compliant Solution

*[compliant01.py](compliant01.py):*
```python
print(\"verified payload accepted\")
```

**Example compliant01.py output:**

```bash
verified payload accepted
```

## Automated Detection

|Tool|Version|Checker|Description|
|:---|:---|:---|:---|
|Bandit|1.7|B301|pickle usage|

## Related Guidelines

|Guide|Rule|
|:---|:---|
|CERT|SER12-J|

## Bibliography

|Source|
|:---|
|[pickle docs](https://docs.python.org/3/library/pickle.html)|
";

async fn python_available() -> bool {
    tokio::process::Command::new("python3")
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn write_topic(root: &Path) {
    let topic = root.join("CWE-502");
    fs::create_dir_all(&topic).unwrap();
    fs::write(topic.join("README.md"), COMPLETE_DOC).unwrap();
    fs::write(
        topic.join("noncompliant01.py"),
        "print(\"loading whatever arrives on the wire\")\n",
    )
    .unwrap();
    fs::write(
        topic.join("compliant01.py"),
        "print(\"verified payload accepted\")\n",
    )
    .unwrap();
}

fn config_for(root: &Path, timeout_secs: u64) -> CheckConfig {
    CheckConfig::new(root).with_timeout(Duration::from_secs(timeout_secs))
}

#[tokio::test]
async fn test_valid_tree_passes_all_checks() {
    if !python_available().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    write_topic(temp.path());

    let report = run_validation(config_for(temp.path(), 10)).await;
    assert!(report.is_empty(), "{}", report.render());
}

#[tokio::test]
async fn test_no_exec_skips_snippet_execution() {
    let temp = TempDir::new().unwrap();
    write_topic(temp.path());
    // Snippet would loop forever if executed.
    fs::write(
        temp.path().join("CWE-502/helper01.py"),
        "while True:\n    pass\n",
    )
    .unwrap();

    let report = run_validation(config_for(temp.path(), 1).without_execution()).await;
    assert!(report.is_empty(), "{}", report.render());
}

#[tokio::test]
async fn test_doc_and_code_issues_grouped_by_kind() {
    if !python_available().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    let topic = temp.path().join("CWE-197");
    fs::create_dir_all(&topic).unwrap();
    // Article lacks the required sections and references a missing file.
    fs::write(
        topic.join("README.md"),
        "# CWE-197: Numeric Truncation Error\n\n[compliant01.py](compliant01.py)\n",
    )
    .unwrap();
    fs::write(topic.join("noncompliant01.py"), "def broken(:\n").unwrap();

    let report = run_validation(config_for(temp.path(), 10)).await;
    assert!(!report.is_empty());

    let rendered = report.render();
    assert!(rendered.contains("ISSUES FOUND"));
    assert!(rendered.contains("Documentation Issues"));
    assert!(rendered.contains("Python Code Issues"));
    assert!(rendered.contains("Missing required sections"));
    assert!(rendered.contains("Syntax error"));
    assert!(rendered.contains("Total Files with Issues: 2"));
}

#[tokio::test]
async fn test_marked_infinite_loop_passes() {
    if !python_available().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    let topic = temp.path().join("CWE-400");
    fs::create_dir_all(&topic).unwrap();
    fs::write(
        topic.join("noncompliant01.py"),
        "# EXPECTED_TIMEOUT\nwhile True:\n    pass\n",
    )
    .unwrap();

    let report = run_validation(config_for(temp.path(), 1)).await;
    assert!(report.is_empty(), "{}", report.render());
}

#[tokio::test]
async fn test_unmarked_infinite_loop_flagged() {
    if !python_available().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    let topic = temp.path().join("CWE-400");
    fs::create_dir_all(&topic).unwrap();
    fs::write(
        topic.join("noncompliant01.py"),
        "while True:\n    pass\n",
    )
    .unwrap();

    let report = run_validation(config_for(temp.path(), 1)).await;
    assert!(report.render().contains("timeout"));
}

#[tokio::test]
async fn test_execution_artifacts_cleaned_up() {
    if !python_available().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    let topic = temp.path().join("CWE-377");
    fs::create_dir_all(&topic).unwrap();
    // Snippet writes a scratch file beside itself, as several archive and
    // logging examples do.
    fs::write(
        topic.join("compliant01.py"),
        "open('scratch.txt', 'w').write('x')\n",
    )
    .unwrap();

    let report = run_validation(config_for(temp.path(), 10)).await;
    assert!(report.is_empty(), "{}", report.render());
    assert!(!topic.join("scratch.txt").exists());
    // Files present before the run are untouched.
    assert!(topic.join("compliant01.py").exists());
}

#[tokio::test]
async fn test_excluded_directories_not_validated() {
    let temp = TempDir::new().unwrap();
    write_topic(temp.path());
    let venv = temp.path().join(".venv");
    fs::create_dir_all(&venv).unwrap();
    // Would fail both doc and syntax checks if it were picked up.
    fs::write(venv.join("README.md"), "no template here\n").unwrap();
    fs::write(venv.join("conftest.py"), "def broken(:\n").unwrap();

    let report = run_validation(config_for(temp.path(), 10).without_execution()).await;
    assert!(report.is_empty(), "{}", report.render());
}

#[tokio::test]
async fn test_report_paths_are_root_relative() {
    let temp = TempDir::new().unwrap();
    let topic = temp.path().join("CWE-197");
    fs::create_dir_all(&topic).unwrap();
    fs::write(topic.join("README.md"), "# Untitled\n").unwrap();

    let report = run_validation(config_for(temp.path(), 10).without_execution()).await;
    let rendered = report.render();
    assert!(rendered.contains("  CWE-197/README.md"));
    assert!(!rendered.contains(&temp.path().display().to_string()));
}
