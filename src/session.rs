//! Run-scoped context: one discovery pass plus guaranteed cleanup.
//!
//! Discovered file lists are values owned by the session rather than
//! module-level caches, so nothing leaks across runs. The session also
//! snapshots the tree before any snippet executes; finalization deletes
//! whatever the executed examples left behind (temp files, databases,
//! extracted archives), regardless of how many validations failed.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::config::CheckConfig;
use crate::scanner;

/// Context for a single validation run.
pub struct Session {
    /// Unique identifier for this run.
    pub run_id: String,
    /// Configuration the run was started with.
    pub config: CheckConfig,
    /// Example snippets, sorted.
    pub code_files: Vec<PathBuf>,
    /// Per-topic articles, sorted.
    pub doc_files: Vec<PathBuf>,
    /// Category directories, sorted.
    pub category_dirs: Vec<PathBuf>,
    /// Paths that existed before anything ran.
    snapshot: HashSet<PathBuf>,
}

impl Session {
    /// Discovers files once and snapshots the tree.
    pub fn begin(config: CheckConfig) -> Self {
        let run_id = format!("run-{}", Uuid::new_v4());
        let code_files = scanner::find_code_files(&config.root);
        let doc_files = scanner::find_doc_files(&config.root);
        let category_dirs = scanner::find_category_dirs(&config.root);
        let snapshot = snapshot_tree(&config);

        info!(
            "Session {}: {} code files, {} doc files, {} category dirs under {}",
            run_id,
            code_files.len(),
            doc_files.len(),
            category_dirs.len(),
            config.root.display()
        );

        Self {
            run_id,
            config,
            code_files,
            doc_files,
            category_dirs,
            snapshot,
        }
    }

    /// Deletes artifacts created since the session began. Cleanup errors
    /// are ignored; a file an example still holds open is not worth
    /// failing the run over.
    pub fn finalize(self) {
        let mut removed = 0usize;
        let mut iter = WalkDir::new(&self.config.root).into_iter();

        while let Some(entry) = iter.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let path = entry.path().to_path_buf();
            if self.snapshot.contains(&path) {
                continue;
            }

            if entry.file_type().is_dir() {
                debug!("Removing artifact directory {}", path.display());
                let _ = fs::remove_dir_all(&path);
                iter.skip_current_dir();
            } else {
                debug!("Removing artifact file {}", path.display());
                let _ = fs::remove_file(&path);
            }
            removed += 1;
        }

        if removed > 0 {
            info!("Session {}: removed {} leftover artifacts", self.run_id, removed);
        }
    }
}

fn snapshot_tree(config: &CheckConfig) -> HashSet<PathBuf> {
    WalkDir::new(&config.root)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_discovers_files_once() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("CWE-193")).unwrap();
        fs::write(temp.path().join("CWE-193/compliant01.py"), "print()\n").unwrap();
        fs::write(temp.path().join("CWE-193/README.md"), "# CWE-193\n").unwrap();

        let session = Session::begin(CheckConfig::new(temp.path()));
        assert_eq!(session.code_files.len(), 1);
        assert_eq!(session.doc_files.len(), 1);
        assert_eq!(session.category_dirs.len(), 1);
        assert!(session.run_id.starts_with("run-"));
    }

    #[test]
    fn test_finalize_removes_new_artifacts_only() {
        let temp = TempDir::new().unwrap();
        let kept = temp.path().join("original.py");
        fs::write(&kept, "print()\n").unwrap();

        let session = Session::begin(CheckConfig::new(temp.path()));

        // Simulate artifacts an executed example left behind.
        let new_file = temp.path().join("school.db");
        let new_dir = temp.path().join("ziptemp");
        fs::write(&new_file, "data").unwrap();
        fs::create_dir_all(new_dir.join("nested")).unwrap();
        fs::write(new_dir.join("nested/part.txt"), "data").unwrap();

        session.finalize();

        assert!(kept.exists());
        assert!(!new_file.exists());
        assert!(!new_dir.exists());
    }

    #[test]
    fn test_finalize_on_pristine_tree_is_noop() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.py");
        fs::write(&file, "print()\n").unwrap();

        let session = Session::begin(CheckConfig::new(temp.path()));
        session.finalize();

        assert!(file.exists());
    }
}
