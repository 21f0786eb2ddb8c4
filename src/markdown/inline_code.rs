//! Comparison of inlined code blocks against the snippets they mirror.
//!
//! Articles inline the full text of each snippet they discuss: a
//! `*[noncompliant01.py](noncompliant01.py):*` reference line followed by
//! a fenced `python` block holding the code.
//!
//! The inlined copy must match the file on disk, ignoring SPDX headers,
//! outcome markers and trailing whitespace.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

fn inlined_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\*\[([^\]]+\.py)\]\([^)]+\):\*\s*```python\s*\n(.*?)\n```")
            .expect("inlined block regex")
    })
}

/// Extracts inlined code blocks keyed by the referenced filename.
pub fn extract_inlined_blocks(content: &str) -> HashMap<String, String> {
    inlined_block_re()
        .captures_iter(content)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Removes SPDX header lines and outcome-marker lines from snippet code.
pub fn strip_annotations(code: &str) -> String {
    code.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("# SPDX-") && !trimmed.starts_with("# EXPECTED_")
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Normalizes code for comparison: trims the whole block and strips
/// trailing whitespace from each line.
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Compares every inlined block in an article against the sibling file it
/// references. Returns one human-readable issue per mismatch or missing
/// file; an unreadable article yields no issues.
pub fn compare_inlined(doc_path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(doc_path) {
        Ok(content) => content,
        Err(err) => {
            debug!("Skipping inline comparison for {}: {}", doc_path.display(), err);
            return Vec::new();
        }
    };

    let doc_dir = match doc_path.parent() {
        Some(dir) => dir,
        None => return Vec::new(),
    };

    let mut issues = Vec::new();
    let mut blocks: Vec<(String, String)> = extract_inlined_blocks(&content).into_iter().collect();
    blocks.sort();

    for (filename, inlined) in blocks {
        let snippet_path = doc_dir.join(&filename);
        let actual = match fs::read_to_string(&snippet_path) {
            Ok(actual) => actual,
            Err(_) => {
                issues.push(format!(
                    "Inlined code references missing file: {}",
                    filename
                ));
                continue;
            }
        };

        let inlined_normalized = normalize_code(&inlined);
        let actual_normalized = normalize_code(&strip_annotations(&actual));

        if inlined_normalized != actual_normalized {
            issues.push(format!(
                "Inlined code for {} does not match the file on disk",
                filename
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNIPPET: &str = "\
# SPDX-License-Identifier: Apache-2.0
# EXPECTED_FAILURE: deliberate demo crash
import os

print(os.getcwd())
";

    fn inlined_doc(code: &str) -> String {
        format!(
            "# CWE-1\n\n*[demo01.py](demo01.py):*\n```python\n{}\n```\n",
            code
        )
    }

    #[test]
    fn test_extract_inlined_blocks() {
        let doc = inlined_doc("print('hi')");
        let blocks = extract_inlined_blocks(&doc);
        assert_eq!(blocks.get("demo01.py").map(String::as_str), Some("print('hi')"));
    }

    #[test]
    fn test_strip_annotations_removes_headers_and_markers() {
        let stripped = strip_annotations(SNIPPET);
        assert!(!stripped.contains("SPDX"));
        assert!(!stripped.contains("EXPECTED_FAILURE"));
        assert!(stripped.contains("import os"));
    }

    #[test]
    fn test_compare_inlined_matching_code() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("demo01.py"), SNIPPET).unwrap();
        let doc_path = temp.path().join("README.md");
        std::fs::write(&doc_path, inlined_doc("import os\n\nprint(os.getcwd())")).unwrap();

        assert!(compare_inlined(&doc_path).is_empty());
    }

    #[test]
    fn test_compare_inlined_mismatch() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("demo01.py"), SNIPPET).unwrap();
        let doc_path = temp.path().join("README.md");
        std::fs::write(&doc_path, inlined_doc("print('something else')")).unwrap();

        let issues = compare_inlined(&doc_path);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("does not match"));
    }

    #[test]
    fn test_compare_inlined_missing_file() {
        let temp = TempDir::new().unwrap();
        let doc_path = temp.path().join("README.md");
        std::fs::write(&doc_path, inlined_doc("print('hi')")).unwrap();

        let issues = compare_inlined(&doc_path);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("missing file"));
    }
}
