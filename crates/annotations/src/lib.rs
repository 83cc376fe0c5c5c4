//! # Annotest Annotations
//!
//! Parses query directives embedded as comments in fixture source files and
//! resolves each one to an exact byte-range selection.
//!
//! A directive is a single-line comment of the form:
//!
//! ```text
//! @verb id "selection-regexp"
//! ```
//!
//! where `verb` is the query mode forwarded to the analysis engine, `id` is a
//! name unique within the file, and the quoted regular expression matches the
//! substring of the directive's own line that is the query's input selection.
//!
//! ## Pipeline
//!
//! ```text
//! Fixture Source
//!     │
//!     ├──> Language Detection (from extension)
//!     │
//!     ├──> Tree-sitter Parsing → comment nodes with byte positions
//!     │
//!     └──> Directive Parsing
//!          ├─> Match @verb id "regexp"
//!          ├─> Reject duplicate ids
//!          ├─> Compile the selection pattern
//!          └─> Resolve it against the directive's line → Query{start, end}
//! ```
//!
//! Malformed directives become [`Diagnostic`]s and never abort the rest of
//! the file; only an unreadable or unparsable file is fatal.

mod comments;
mod error;
mod language;
mod parser;
mod types;

pub use comments::{extract_comments, CommentSpan};
pub use error::{AnnotationError, Result};
pub use language::Language;
pub use parser::parse_queries;
pub use types::{Diagnostic, ParseOutcome, Position, Query};
