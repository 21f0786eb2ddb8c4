//! Link validation for articles and the top-level index.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::markdown::extract_links;
use crate::report::Issue;

/// Filename of the top-level index document.
pub const INDEX_FILENAME: &str = "readme.md";

/// Returns true for links that point outside the tree and are not
/// checked: absolute urls, mail links and in-page anchors.
fn is_external(url: &str) -> bool {
    url.contains("://") || url.starts_with("mailto:") || url.starts_with('#')
}

/// Validates that every relative link in an article resolves to an
/// existing file or directory beside it.
pub fn check_doc_links(doc_path: &Path) -> Vec<Issue> {
    let content = match fs::read_to_string(doc_path) {
        Ok(content) => content,
        Err(err) => {
            debug!("Skipping unreadable doc {}: {}", doc_path.display(), err);
            return Vec::new();
        }
    };

    let doc_dir = match doc_path.parent() {
        Some(dir) => dir,
        None => return Vec::new(),
    };

    extract_links(&content)
        .into_iter()
        .filter(|(_, url)| !is_external(url))
        .filter(|(_, url)| !doc_dir.join(url).exists())
        .map(|(text, url)| Issue::new(doc_path, format!("Broken link: [{}]({})", text, url)))
        .collect()
}

/// Validates the links in the top-level index table. Only links to
/// article READMEs are checked; a `/.` suffix is shorthand for the
/// directory's README. A missing index file is not an issue.
pub fn check_index(root: &Path) -> Vec<Issue> {
    let index_path = root.join(INDEX_FILENAME);
    let content = match fs::read_to_string(&index_path) {
        Ok(content) => content,
        Err(_) => {
            debug!("No index file at {}", index_path.display());
            return Vec::new();
        }
    };

    extract_links(&content)
        .into_iter()
        .filter(|(_, url)| !is_external(url))
        .filter(|(_, url)| url.ends_with("README.md") || url.ends_with('.'))
        .map(|(text, url)| {
            let target = match url.strip_suffix("/.") {
                Some(prefix) => format!("{}/README.md", prefix),
                None => url.clone(),
            };
            (text, url, target)
        })
        .filter(|(_, _, target)| !root.join(target).exists())
        .map(|(text, url, _)| {
            Issue::new(
                &index_path,
                format!("Broken index link: [{}]({})", text, url),
            )
        })
        .collect()
}
