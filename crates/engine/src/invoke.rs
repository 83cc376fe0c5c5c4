use crate::error::{EngineError, Result};
use annotest_annotations::Query;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;

/// Compilation/search context the engine resolves imports and dependencies
/// against. Threaded explicitly; never ambient process state.
#[derive(Debug, Clone)]
pub struct AnalysisScope {
    /// Root directory of the analyzed program
    pub root: PathBuf,
}

impl AnalysisScope {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Builds the canonical location specifier `<file>:#<start>,#<end>`
pub fn location_spec(filename: &str, start: usize, end: usize) -> String {
    format!("{filename}:#{start},#{end}")
}

/// One engine invocation, fully assembled
pub struct QueryRequest<'a> {
    /// Query mode, forwarded verbatim
    pub verb: &'a str,

    /// Canonical location specifier
    pub location: String,

    /// Source files making up the analyzed program
    pub files: &'a [String],

    /// Build/search context
    pub scope: &'a AnalysisScope,
}

/// The engine's answer for one query: a plain-text renderer plus a fully
/// structured representation
pub trait QueryOutput: std::fmt::Debug {
    /// Render compiler-diagnostic-style lines (`location: message`)
    fn write_plain(&self, out: &mut dyn Write) -> io::Result<()>;

    /// The structured form of the result
    fn structured(&self) -> Result<serde_json::Value>;
}

/// The analysis engine, treated as a black box
pub trait AnalysisEngine {
    fn run_query(&self, request: &QueryRequest<'_>) -> Result<Box<dyn QueryOutput>>;
}

/// Poses `query` to the engine with the location derived from its selection
pub fn invoke(
    engine: &dyn AnalysisEngine,
    query: &Query,
    scope: &AnalysisScope,
) -> Result<Box<dyn QueryOutput>> {
    let request = QueryRequest {
        verb: &query.verb,
        location: location_spec(&query.filename, query.start, query.end),
        files: std::slice::from_ref(&query.filename),
        scope,
    };
    log::debug!("engine query: @{} {} {}", query.verb, query.id, request.location);
    engine.run_query(&request)
}

/// Production engine: spawns an external binary once per query.
///
/// The invocation is `<program> [extra args] -root=<scope> <verb>
/// <location> <files...>`; stdout is the result, a non-zero exit turns
/// stderr into the query's error. Calls block with no timeout.
pub struct CommandEngine {
    program: PathBuf,
    extra_args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Add a fixed argument placed before the verb on every invocation
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Add several fixed arguments
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args.extend(args);
        self
    }
}

impl AnalysisEngine for CommandEngine {
    fn run_query(&self, request: &QueryRequest<'_>) -> Result<Box<dyn QueryOutput>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.extra_args)
            .arg(format!("-root={}", request.scope.root.display()))
            .arg(request.verb)
            .arg(&request.location)
            .args(request.files);

        let output = cmd.output().map_err(|source| EngineError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                stderr
            };
            return Err(EngineError::query(message));
        }

        Ok(Box::new(CapturedOutput {
            text: String::from_utf8_lossy(&output.stdout).into_owned(),
        }))
    }
}

/// Engine stdout, captured verbatim
#[derive(Debug)]
struct CapturedOutput {
    text: String,
}

impl QueryOutput for CapturedOutput {
    fn write_plain(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.text.as_bytes())
    }

    fn structured(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn location_spec_is_canonical() {
        assert_eq!(
            location_spec("testdata/src/main/calls.rs", 120, 123),
            "testdata/src/main/calls.rs:#120,#123"
        );
    }

    #[test]
    fn captured_output_renders_both_forms() {
        let output = CapturedOutput {
            text: "{\"mode\": \"callers\"}".to_string(),
        };

        let mut plain = Vec::new();
        output.write_plain(&mut plain).unwrap();
        assert_eq!(plain, b"{\"mode\": \"callers\"}");

        let value = output.structured().unwrap();
        assert_eq!(value["mode"], "callers");
    }

    #[test]
    fn non_json_output_fails_structured_rendering() {
        let output = CapturedOutput {
            text: "plain diagnostic line\n".to_string(),
        };
        assert!(output.structured().is_err());
    }

    #[test]
    fn missing_engine_binary_is_a_spawn_error() {
        let engine = CommandEngine::new("/no/such/engine");
        let scope = AnalysisScope::new("testdata");
        let files = vec!["calls.rs".to_string()];
        let request = QueryRequest {
            verb: "callers",
            location: location_spec("calls.rs", 0, 3),
            files: &files,
            scope: &scope,
        };
        let err = engine.run_query(&request).unwrap_err();
        assert!(matches!(err, EngineError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failing_engine_surfaces_stderr_as_query_error() {
        let engine = CommandEngine::new("/bin/sh").arg("-c").arg("echo 'calls.rs:1:1: boom' >&2; exit 1");
        let scope = AnalysisScope::new("testdata");
        let files = vec!["calls.rs".to_string()];
        let request = QueryRequest {
            verb: "callers",
            location: location_spec("calls.rs", 0, 3),
            files: &files,
            scope: &scope,
        };
        let err = engine.run_query(&request).unwrap_err();
        assert_eq!(err.to_string(), "calls.rs:1:1: boom");
    }
}
