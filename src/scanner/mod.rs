//! File discovery for the validation harness.
//!
//! Recursively scans the guide directory tree and discovers example
//! snippets, per-topic README articles and category directories. Results
//! are sorted so downstream validation order is reproducible.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// File extension of example snippets.
pub const CODE_EXTENSION: &str = "py";

/// Filename of per-topic documentation articles.
pub const DOC_FILENAME: &str = "README.md";

/// Name prefix of category directories (`CWE-<digits>`).
pub const CATEGORY_PREFIX: &str = "CWE-";

/// Path segments that are never scanned: tooling, virtual envs, caches
/// and harness-internal directories.
const EXCLUDED_DIRS: &[&str] = &[
    "templates",
    "tests",
    ".venv",
    "venv",
    "__pycache__",
    ".tox",
    ".pytest_cache",
    "build",
    "dist",
    ".eggs",
];

/// Returns true if any path segment below `root` is in the exclusion set.
fn is_excluded(path: &Path, root: &Path) -> bool {
    let rel = match path.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => path,
    };
    rel.components().any(|component| {
        let name = component.as_os_str().to_string_lossy();
        EXCLUDED_DIRS.iter().any(|excluded| name == *excluded)
    })
}

/// Recursively finds all example snippets (`*.py`) under the root.
///
/// Excluded directories are skipped and the result is sorted
/// lexicographically by path.
pub fn find_code_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == CODE_EXTENSION)
                .unwrap_or(false)
        })
        .filter(|path| !is_excluded(path, root))
        .collect();

    files.sort();
    debug!("Discovered {} code files under {}", files.len(), root.display());
    files
}

/// Recursively finds all per-topic `README.md` files under the root.
///
/// A README directly under the root is the index, not a topic article,
/// and is excluded along with the standard exclusion set.
pub fn find_doc_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .map(|name| name == DOC_FILENAME)
                .unwrap_or(false)
        })
        .filter(|path| !is_excluded(path, root))
        .filter(|path| path.parent() != Some(root))
        .collect();

    files.sort();
    debug!("Discovered {} doc files under {}", files.len(), root.display());
    files
}

/// Finds all category directories under the root.
///
/// A category directory is named exactly `CWE-` followed by digits only.
pub fn find_category_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .map(|name| is_category_name(&name.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    dirs.sort();
    dirs
}

/// Returns true for names of the form `CWE-<digits>`.
fn is_category_name(name: &str) -> bool {
    match name.strip_prefix(CATEGORY_PREFIX) {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_guide_tree(root: &Path) {
        fs::create_dir_all(root.join("CWE-664/CWE-409")).unwrap();
        fs::create_dir_all(root.join("CWE-693")).unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("tests/utils")).unwrap();
        fs::create_dir_all(root.join(".venv/lib")).unwrap();

        fs::write(root.join("CWE-664/CWE-409/compliant01.py"), "print()\n").unwrap();
        fs::write(root.join("CWE-664/CWE-409/noncompliant01.py"), "print()\n").unwrap();
        fs::write(root.join("CWE-664/CWE-409/README.md"), "# CWE-409\n").unwrap();
        fs::write(root.join("templates/template01.py"), "print()\n").unwrap();
        fs::write(root.join("templates/README.md"), "# Template\n").unwrap();
        fs::write(root.join("tests/utils/helper.py"), "print()\n").unwrap();
        fs::write(root.join(".venv/lib/site.py"), "print()\n").unwrap();
        fs::write(root.join("README.md"), "# Index\n").unwrap();
    }

    #[test]
    fn test_find_code_files_excludes_tooling_dirs() {
        let temp = TempDir::new().unwrap();
        create_guide_tree(temp.path());

        let files = find_code_files(temp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.starts_with(temp.path().join("CWE-664"))));
    }

    #[test]
    fn test_find_code_files_sorted() {
        let temp = TempDir::new().unwrap();
        create_guide_tree(temp.path());

        let files = find_code_files(temp.path());
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_find_doc_files_excludes_root_index() {
        let temp = TempDir::new().unwrap();
        create_guide_tree(temp.path());

        let files = find_doc_files(temp.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0], temp.path().join("CWE-664/CWE-409/README.md"));
    }

    #[test]
    fn test_find_category_dirs() {
        let temp = TempDir::new().unwrap();
        create_guide_tree(temp.path());
        fs::create_dir_all(temp.path().join("CWE-abc")).unwrap();
        fs::create_dir_all(temp.path().join("CWE-12x")).unwrap();

        let dirs = find_category_dirs(temp.path());
        let names: Vec<String> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["CWE-409", "CWE-664", "CWE-693"]);
    }

    #[test]
    fn test_is_category_name() {
        assert!(is_category_name("CWE-409"));
        assert!(is_category_name("CWE-1109"));
        assert!(!is_category_name("CWE-"));
        assert!(!is_category_name("CWE-12x"));
        assert!(!is_category_name("cwe-409"));
        assert!(!is_category_name("Intro_to_multiprocessing"));
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let files = find_code_files(Path::new("/nonexistent/guide"));
        assert!(files.is_empty());
    }
}
