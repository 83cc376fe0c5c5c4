use std::fmt;

/// A source position, 1-indexed line and column plus absolute byte offset.
///
/// Columns are measured in bytes; lines containing multi-byte characters
/// before a directive are not supported (known limitation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Path of the fixture file
    pub file: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Byte column within the line (1-indexed)
    pub column: usize,

    /// Absolute byte offset within the file
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One parsed query directive, resolved to a byte-range selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Unique id within the fixture file
    pub id: String,

    /// Query mode, e.g. "callers"; opaque to the harness
    pub verb: String,

    /// Position of the directive itself, for diagnostics only
    pub position: Position,

    /// Path of the annotated fixture file
    pub filename: String,

    /// Selection start, byte offset into the file
    pub start: usize,

    /// Selection end, byte offset into the file (exclusive)
    pub end: usize,
}

/// One recoverable directive problem, tied to a source position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// Result of parsing one fixture file: queries in source order plus the
/// diagnostics accumulated along the way
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub queries: Vec<Query>,
    pub diagnostics: Vec<Diagnostic>,
}
