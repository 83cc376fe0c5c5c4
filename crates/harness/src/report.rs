use std::fmt;

/// One accumulated failure, tied to the fixture it came from
#[derive(Debug, Clone)]
pub struct Failure {
    /// Fixture path or other context label
    pub context: String,

    /// Human-readable description; may span lines (diff bodies do)
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// Accumulates per-file, per-directive failures across a run.
///
/// Nothing here interrupts control flow; the driver records and moves on so
/// that one invocation surfaces as many actionable diagnostics as possible.
#[derive(Debug, Default)]
pub struct Reporter {
    failures: Vec<Failure>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure
    pub fn fail(&mut self, context: impl Into<String>, message: impl Into<String>) {
        let failure = Failure {
            context: context.into(),
            message: message.into(),
        };
        log::debug!("reported failure: {failure}");
        self.failures.push(failure);
    }

    /// All failures, in the order they were recorded
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// One-line run summary
    pub fn summary(&self) -> String {
        format!("{} failure(s)", self.failures.len())
    }
}
