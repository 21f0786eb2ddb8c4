//! Structural validation of per-topic articles.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::markdown::{self, DocStructure, CANONICAL_SECTIONS, TITLE_PREFIX};
use crate::report::Issue;

/// Validates one article against the template contract: title, required
/// sections, required tables, section order, existing code references
/// and matching inlined code. Returns all issues found; an unreadable
/// article yields none (no signal).
pub fn check_doc(doc_path: &Path) -> Vec<Issue> {
    let content = match fs::read_to_string(doc_path) {
        Ok(content) => content,
        Err(err) => {
            debug!("Skipping unreadable doc {}: {}", doc_path.display(), err);
            return Vec::new();
        }
    };

    let structure = DocStructure::parse(&content);
    let mut issues = Vec::new();

    if !structure.has_cwe_title() {
        issues.push(Issue::new(
            doc_path,
            format!("Missing title heading starting with '{}'", TITLE_PREFIX),
        ));
    }

    let missing_sections = structure.missing_sections();
    if !missing_sections.is_empty() {
        issues.push(Issue::new(
            doc_path,
            format!("Missing required sections: {}", missing_sections.join(", ")),
        ));
    }

    let missing_tables = structure.missing_tables();
    if !missing_tables.is_empty() {
        issues.push(Issue::new(
            doc_path,
            format!("Missing required tables: {}", missing_tables.join(", ")),
        ));
    }

    issues.extend(missing_reference_issues(doc_path, &structure));

    for order_issue in section_order_issues(&structure) {
        issues.push(Issue::new(doc_path, order_issue));
    }

    for inline_issue in markdown::inline_code::compare_inlined(doc_path) {
        issues.push(Issue::new(doc_path, inline_issue));
    }

    issues
}

/// Flags referenced snippets that do not exist beside the article.
fn missing_reference_issues(doc_path: &Path, structure: &DocStructure) -> Vec<Issue> {
    let doc_dir = match doc_path.parent() {
        Some(dir) => dir,
        None => return Vec::new(),
    };

    let missing: Vec<&str> = structure
        .code_references
        .iter()
        .filter(|name| !doc_dir.join(name.as_str()).exists())
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        Vec::new()
    } else {
        vec![Issue::new(
            doc_path,
            format!("Missing referenced code files: {}", missing.join(", ")),
        )]
    }
}

/// Validates the relative order of the canonical sections that are
/// present. Walks every adjacent pair of discovered sections and flags a
/// pair whose later member has an earlier canonical rank. Missing
/// sections are not an ordering violation; the completeness check covers
/// those.
pub fn section_order_issues(structure: &DocStructure) -> Vec<String> {
    let rank = |name: &str| CANONICAL_SECTIONS.iter().position(|c| *c == name);

    structure
        .section_order
        .windows(2)
        .filter_map(|pair| {
            let (current, _) = pair[0];
            let (next, _) = pair[1];
            match (rank(current), rank(next)) {
                (Some(current_rank), Some(next_rank)) if current_rank > next_rank => {
                    Some(format!(
                        "Section order issue: '{}' appears before '{}' (expected '{}' first)",
                        current, next, next
                    ))
                }
                _ => None,
            }
        })
        .collect()
}
