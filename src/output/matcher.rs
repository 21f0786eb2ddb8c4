//! Fuzzy comparison of captured output against documented output.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Fraction of key phrases that must be present for a fuzzy match.
const MATCH_THRESHOLD: f64 = 0.7;

/// Missing phrases listed in a mismatch message before eliding the rest.
const MAX_REPORTED_MISSING: usize = 5;

/// Key phrases are runs of 3+ characters starting with a letter.
fn key_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9_\-.]{2,}\b").expect("key phrase regex"))
}

/// Result of comparing actual output against an expectation.
#[derive(Debug, Clone)]
pub struct OutputMatch {
    /// Whether the output is considered a match.
    pub matched: bool,
    /// Human-readable description of the match or mismatch.
    pub detail: String,
}

impl OutputMatch {
    fn matched(detail: String) -> Self {
        Self {
            matched: true,
            detail,
        }
    }

    fn mismatch(detail: String) -> Self {
        Self {
            matched: false,
            detail,
        }
    }
}

/// Collapses whitespace runs to single spaces and trims.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Extracts key phrases from expected output, de-duplicated
/// case-insensitively while preserving first occurrence.
fn key_phrases(expected: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut phrases = Vec::new();

    for phrase in key_phrase_re().find_iter(expected) {
        let phrase = phrase.as_str();
        if seen.insert(phrase.to_lowercase()) {
            phrases.push(phrase.to_string());
        }
    }

    phrases
}

/// Compares actual output against documented expected output.
///
/// Whitespace-normalized equality is an exact match. Otherwise the
/// expected text's key phrases are searched for in the actual output; a
/// match is declared when all are found, or at least 70% of them.
/// Documented outputs often contain timestamps, object ids or random
/// tokens that must not cause spurious failures.
pub fn match_output(actual: &str, expected: &str) -> OutputMatch {
    let actual_normalized = normalize(actual);
    let expected_normalized = normalize(expected);

    if actual_normalized == expected_normalized {
        return OutputMatch::matched("Output matches exactly".to_string());
    }

    let phrases = key_phrases(expected);
    let actual_lower = actual_normalized.to_lowercase();

    let missing: Vec<&String> = phrases
        .iter()
        .filter(|phrase| !actual_lower.contains(&phrase.to_lowercase()))
        .collect();

    if missing.is_empty() {
        return OutputMatch::matched(format!(
            "Output matches (found all {} key phrases)",
            phrases.len()
        ));
    }

    let match_ratio = (phrases.len() - missing.len()) as f64 / phrases.len() as f64;

    if match_ratio >= MATCH_THRESHOLD {
        return OutputMatch::matched(format!(
            "Output mostly matches ({:.0}% of key phrases found)",
            match_ratio * 100.0
        ));
    }

    let mut missing_str = missing
        .iter()
        .take(MAX_REPORTED_MISSING)
        .map(|s| s.as_str())
        .collect::<Vec<&str>>()
        .join(", ");
    if missing.len() > MAX_REPORTED_MISSING {
        missing_str.push_str(&format!(", ... ({} more)", missing.len() - MAX_REPORTED_MISSING));
    }

    OutputMatch::mismatch(format!(
        "Output mismatch: missing key phrases: {}",
        missing_str
    ))
}
