//! Heading, link and table extraction from article text.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::scanner::CODE_EXTENSION;

/// The five canonical section name fragments every article must carry,
/// in template order.
pub const CANONICAL_SECTIONS: [&str; 5] = [
    "Non-Compliant Code Example",
    "Compliant Solution",
    "Automated Detection",
    "Related Guidelines",
    "Bibliography",
];

/// Sections that must be followed by a table.
pub const TABLE_SECTIONS: [&str; 3] = [
    "Automated Detection",
    "Related Guidelines",
    "Bibliography",
];

/// Required prefix of the article's title heading.
pub const TITLE_PREFIX: &str = "CWE-";

/// A heading is followed by a table if one appears within this many lines.
const TABLE_LOOKAHEAD_LINES: usize = 20;

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("heading regex"))
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"))
}

/// Parsed structure of one documentation article.
#[derive(Debug, Clone, Default)]
pub struct DocStructure {
    /// Text of every heading, in document order.
    pub sections: Vec<String>,
    /// All `[text](url)` links, with any trailing quoted title stripped.
    pub links: Vec<(String, String)>,
    /// De-duplicated, sorted base filenames of referenced snippets.
    pub code_references: Vec<String>,
    /// Whether "Automated Detection" is followed by a table.
    pub has_automated_detection_table: bool,
    /// Whether "Related Guidelines" is followed by a table.
    pub has_related_guidelines_table: bool,
    /// Whether "Bibliography" is followed by a table.
    pub has_bibliography_table: bool,
    /// (canonical section, line index) for every heading that contains a
    /// canonical fragment, in document order with repeats.
    pub section_order: Vec<(&'static str, usize)>,
}

impl DocStructure {
    /// Parses article text. Never fails; malformed markdown yields
    /// empty/false fields.
    pub fn parse(content: &str) -> Self {
        Self {
            sections: extract_sections(content),
            links: extract_links(content),
            code_references: extract_code_references(content),
            has_automated_detection_table: section_has_table(content, "Automated Detection"),
            has_related_guidelines_table: section_has_table(content, "Related Guidelines"),
            has_bibliography_table: section_has_table(content, "Bibliography"),
            section_order: extract_section_order(content),
        }
    }

    /// Returns true if some heading starts with the `CWE-` title prefix.
    pub fn has_cwe_title(&self) -> bool {
        self.sections
            .iter()
            .any(|section| section.starts_with(TITLE_PREFIX))
    }

    /// Canonical sections with no matching heading, in template order.
    pub fn missing_sections(&self) -> Vec<&'static str> {
        CANONICAL_SECTIONS
            .iter()
            .filter(|required| {
                let required = required.to_lowercase();
                !self
                    .sections
                    .iter()
                    .any(|section| section.to_lowercase().contains(&required))
            })
            .copied()
            .collect()
    }

    /// Table-bearing sections whose table is missing, in template order.
    pub fn missing_tables(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_automated_detection_table {
            missing.push(TABLE_SECTIONS[0]);
        }
        if !self.has_related_guidelines_table {
            missing.push(TABLE_SECTIONS[1]);
        }
        if !self.has_bibliography_table {
            missing.push(TABLE_SECTIONS[2]);
        }
        missing
    }
}

/// Extracts the text of every markdown heading, in document order.
fn extract_sections(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| heading_re().captures(line.trim()))
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Extracts all `[text](url)` links; a trailing ` "title"` suffix is
/// stripped from the url.
pub fn extract_links(content: &str) -> Vec<(String, String)> {
    link_re()
        .captures_iter(content)
        .map(|caps| {
            let text = caps[1].to_string();
            let url = match caps[2].split_once(" \"") {
                Some((url, _title)) => url.to_string(),
                None => caps[2].to_string(),
            };
            (text, url)
        })
        .collect()
}

/// Extracts referenced snippet filenames: link urls ending in the code
/// extension, path stripped, de-duplicated and sorted.
fn extract_code_references(content: &str) -> Vec<String> {
    let suffix = format!(".{}", CODE_EXTENSION);
    let names: BTreeSet<String> = extract_links(content)
        .into_iter()
        .filter(|(_, url)| url.ends_with(&suffix))
        .filter_map(|(_, url)| {
            Path::new(&url)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .collect();
    names.into_iter().collect()
}

/// Returns true if a heading whose full text is `section_name`
/// (case-insensitive) is followed within 20 lines by a table indicator:
/// a pipe character or an HTML `<table>` tag.
fn section_has_table(content: &str, section_name: &str) -> bool {
    let pattern = format!(r"(?i)^#{{1,6}}\s+{}\s*$", regex::escape(section_name));
    let heading = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return false,
    };

    let lines: Vec<&str> = content.lines().collect();
    let heading_index = match lines.iter().position(|line| heading.is_match(line.trim())) {
        Some(index) => index,
        None => return false,
    };

    lines
        .iter()
        .skip(heading_index + 1)
        .take(TABLE_LOOKAHEAD_LINES)
        .any(|line| line.contains('|') || line.to_lowercase().contains("<table>"))
}

/// Extracts (canonical section, line index) for every heading containing
/// a canonical fragment, preserving document order and repeats.
fn extract_section_order(content: &str) -> Vec<(&'static str, usize)> {
    let mut positions = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let heading = match heading_re().captures(line.trim()) {
            Some(caps) => caps[1].trim().to_lowercase(),
            None => continue,
        };
        for canonical in CANONICAL_SECTIONS {
            if heading.contains(&canonical.to_lowercase()) {
                positions.push((canonical, index));
                break;
            }
        }
    }

    positions
}
