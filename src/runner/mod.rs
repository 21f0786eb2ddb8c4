//! Subprocess execution of example snippets.
//!
//! Each snippet runs as a fresh interpreter process with a bounded
//! wall-clock timeout and, for the deprecation check, warnings elevated
//! to errors. The outcome is reconciled against the snippet's
//! expected-outcome marker.

mod executor;
mod outcome;

pub use executor::Executor;
pub use outcome::{classify, ExecOutcome};
