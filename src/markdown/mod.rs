//! Structural parsing of per-topic documentation articles.
//!
//! Articles follow a fixed template: a `CWE-` title, five canonical
//! sections, tables under three of them, and inline links to the example
//! snippets they discuss. Parsing never fails on malformed input; absent
//! structure simply yields empty or false results.

pub mod inline_code;
mod structure;

pub use structure::{
    extract_links, DocStructure, CANONICAL_SECTIONS, TABLE_SECTIONS, TITLE_PREFIX,
};
