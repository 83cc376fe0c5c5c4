//! # Annotest Engine
//!
//! Drives the external analysis engine and renders its answers.
//!
//! The engine itself is a black box behind [`AnalysisEngine`]: the harness
//! hands it a verb, a canonical location specifier
//! (`<file>:#<start>,#<end>`), the program's source files and an
//! [`AnalysisScope`], and gets back either a [`QueryOutput`] or an
//! [`EngineError`]. [`CommandEngine`] is the production implementation,
//! spawning a configured binary once per query; tests supply their own.
//!
//! Rendering is deliberately textual: output lines are compared
//! byte-for-byte against checked-in golden files, so location prefixes
//! (`path:line:col: `) are stripped before anything is written.

mod error;
mod invoke;
mod output;

pub use error::{EngineError, Result};
pub use invoke::{
    invoke, location_spec, AnalysisEngine, AnalysisScope, CommandEngine, QueryOutput, QueryRequest,
};
pub use output::{strip_location, write_query_result, OutputMode};
