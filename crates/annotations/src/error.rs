use thiserror::Error;

/// Result type for annotation parsing
pub type Result<T> = std::result::Result<T, AnnotationError>;

/// Fatal per-file errors; recoverable directive problems are [`crate::Diagnostic`]s
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// Failed to parse the fixture source
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Fixture language has no comment-extraction support
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl AnnotationError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}
