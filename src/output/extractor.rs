//! Extraction of documented expected-output blocks.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Matches the header phrase introducing an expected-output block, in its
/// several surface forms:
///
/// - `**Example noncompliant01.py output:**`
/// - `**Example `noncompliant01.py` output:**`
/// - `Example compliant01.py output:`
/// - `__Example compliant01.py output:__`
/// - `**Example output of `noncompliant01.py` output:**`
fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:\*\*|__)?Example\s+(?:output\s+of\s+)?`?([a-zA-Z0-9_]+\.py)`?\s+output:?(?:\*\*|__)?",
        )
        .expect("output header regex")
    })
}

/// Matches the next fenced code block, optionally tagged `bash`.
fn code_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:bash)?\s*\n(.*?)```").expect("code block regex"))
}

/// Extracts expected outputs from article text, keyed by the referenced
/// snippet filename. Each header is paired with the nearest following
/// fenced block; if a filename recurs, the last occurrence wins.
pub fn extract_expected_output(content: &str) -> HashMap<String, String> {
    let mut expected = HashMap::new();

    for caps in header_re().captures_iter(content) {
        let filename = caps[1].to_string();
        let rest = &content[caps.get(0).map(|m| m.end()).unwrap_or(0)..];

        if let Some(block) = code_block_re().captures(rest) {
            expected.insert(filename, block[1].trim().to_string());
        }
    }

    expected
}
