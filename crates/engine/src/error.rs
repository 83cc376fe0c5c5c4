use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced while querying the analysis engine.
///
/// These never abort a batch: the formatter renders them inline as the
/// query's output.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine ran and reported a failure for this query
    #[error("{0}")]
    Query(String),

    /// The engine binary could not be launched
    #[error("failed to launch engine {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The engine's output could not be interpreted as structured data
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EngineError {
    /// Create a query-level failure from the engine's own message
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }
}
