//! Expected-output extraction and fuzzy matching.
//!
//! Articles may document the output of a snippet ("Example
//! `noncompliant01.py` output:" followed by a fenced block). Captured
//! program output is compared against that block with key-phrase
//! matching, since documented outputs often contain timestamps, object
//! ids and other nondeterministic values.

mod extractor;
mod matcher;

pub use extractor::extract_expected_output;
pub use matcher::{match_output, OutputMatch};
