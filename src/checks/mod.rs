//! Validation rules over discovered files.
//!
//! Every rule is isolated: one file's failure never aborts processing of
//! the others, and rules on the same file are independent of each other.
//! Rules emit [`crate::report::Issue`] records; they never panic or
//! propagate per-file errors.

pub mod code;
pub mod docs;
pub mod links;
