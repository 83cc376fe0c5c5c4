use crate::error::Result;
use crate::invoke::QueryOutput;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// How a fixture's query results are rendered, selected per file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Compiler-diagnostic-style lines with location prefixes stripped
    Plain,

    /// Pretty-printed structured form, tab-indented
    Structured,
}

impl OutputMode {
    /// Fixtures whose stem ends in `-json` compare structured output;
    /// everything else compares plain output.
    pub fn for_fixture(path: impl AsRef<Path>) -> Self {
        let stem = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        if stem.ends_with("-json") {
            OutputMode::Structured
        } else {
            OutputMode::Plain
        }
    }
}

/// Removes a leading `path:line:col: ` prefix.
///
/// The rule is exact: everything up to and including the first `": "` is
/// discarded; a line without one comes back unchanged. Location text is too
/// environment-fragile to compare against checked-in fixtures.
pub fn strip_location(line: &str) -> &str {
    match line.find(": ") {
        Some(i) => &line[i + 2..],
        None => line,
    }
}

/// Writes one query's result to `out` as a comparable block.
///
/// The banner line `-------- @verb id --------` always comes first and is
/// itself part of the golden output. Engine errors render inline as
/// `Error: <message>` rather than aborting the batch.
pub fn write_query_result(
    out: &mut dyn Write,
    verb: &str,
    id: &str,
    result: Result<Box<dyn QueryOutput>>,
    mode: OutputMode,
) -> io::Result<()> {
    writeln!(out, "-------- @{verb} {id} --------")?;

    let output = match result {
        Ok(output) => output,
        Err(err) => {
            return writeln!(out, "\nError: {}", strip_location(&err.to_string()));
        }
    };

    match mode {
        OutputMode::Structured => match output.structured() {
            Ok(value) => write_tab_indented(out, &value),
            Err(err) => writeln!(out, "JSON error: {err}"),
        },
        OutputMode::Plain => {
            let mut capture = Vec::new();
            output.write_plain(&mut capture)?;
            for line in String::from_utf8_lossy(&capture).split('\n') {
                writeln!(out, "{}", strip_location(line))?;
            }
            Ok(())
        }
    }
}

fn write_tab_indented(out: &mut dyn Write, value: &serde_json::Value) -> io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut ser) {
        Ok(()) => out.write_all(&buf),
        Err(err) => writeln!(out, "JSON error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct StubOutput {
        text: String,
    }

    impl QueryOutput for StubOutput {
        fn write_plain(&self, out: &mut dyn Write) -> io::Result<()> {
            out.write_all(self.text.as_bytes())
        }

        fn structured(&self) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(&self.text)?)
        }
    }

    fn render(result: Result<Box<dyn QueryOutput>>, mode: OutputMode) -> String {
        let mut out = Vec::new();
        write_query_result(&mut out, "callers", "C1", result, mode).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn strip_location_drops_through_first_colon_space() {
        assert_eq!(
            strip_location("path/to/file.go:12:3: some message"),
            "some message"
        );
        assert_eq!(strip_location("no location here"), "no location here");
        assert_eq!(strip_location(""), "");
    }

    #[test]
    fn strip_location_is_idempotent_on_stripped_output() {
        let once = strip_location("src/main.rs:1:2: found 3 callers");
        assert_eq!(strip_location(once), once);
    }

    #[test]
    fn plain_mode_emits_banner_and_stripped_lines() {
        let output = StubOutput {
            text: "src/calls.rs:4:2: found a caller\nsrc/calls.rs:9:5: found another\n"
                .to_string(),
        };
        let got = render(Ok(Box::new(output)), OutputMode::Plain);
        assert_eq!(
            got,
            "-------- @callers C1 --------\nfound a caller\nfound another\n\n"
        );
    }

    #[test]
    fn structured_mode_pretty_prints_with_tabs() {
        let output = StubOutput {
            text: "{\"mode\":\"callers\",\"count\":2}".to_string(),
        };
        let got = render(Ok(Box::new(output)), OutputMode::Structured);
        // serde_json::Value orders object keys alphabetically, which is part
        // of the determinism contract for golden comparison.
        assert_eq!(
            got,
            "-------- @callers C1 --------\n{\n\t\"count\": 2,\n\t\"mode\": \"callers\"\n}"
        );
    }

    #[test]
    fn structured_mode_reports_unparsable_output() {
        let output = StubOutput {
            text: "not json".to_string(),
        };
        let got = render(Ok(Box::new(output)), OutputMode::Structured);
        assert!(got.starts_with("-------- @callers C1 --------\nJSON error: "));
    }

    #[test]
    fn engine_error_renders_inline_with_location_stripped() {
        let err = EngineError::query("testdata/src/calls.rs:7:1: no callers found");
        let got = render(Err(err), OutputMode::Plain);
        assert_eq!(
            got,
            "-------- @callers C1 --------\n\nError: no callers found\n"
        );
    }

    #[test]
    fn mode_is_selected_per_fixture_stem() {
        assert_eq!(OutputMode::for_fixture("calls.rs"), OutputMode::Plain);
        assert_eq!(
            OutputMode::for_fixture("testdata/src/calls-json.rs"),
            OutputMode::Structured
        );
        assert_eq!(OutputMode::for_fixture("json.rs"), OutputMode::Plain);
    }
}
