//! # Annotest Harness
//!
//! The driver loop and golden comparison.
//!
//! For every fixture file, the harness parses its query directives, poses
//! each query to the analysis engine in directive order, appends each
//! rendered block to a sibling `.got` artifact, and compares it textually
//! against the checked-in `.golden` fixture. Mismatches are accumulated in a
//! [`Reporter`], never fatal: a run always attempts every file and every
//! directive to maximize the diagnostics produced per invocation.
//!
//! Execution is single-threaded and strictly sequential; correctness depends
//! on textual determinism, which parallel interleaving would threaten.

mod artifacts;
mod compare;
mod driver;
mod report;

pub use artifacts::{golden_path, got_path};
pub use compare::{CompareError, FileCopy, FileDiff, SystemCopy, SystemDiff};
pub use driver::{Harness, HarnessConfig};
pub use report::{Failure, Reporter};
