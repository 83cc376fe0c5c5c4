use crate::comments::extract_comments;
use crate::error::Result;
use crate::language::Language;
use crate::types::{Diagnostic, ParseOutcome, Position, Query};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Directive form: `@verb id "regexp"`
static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@([a-z]+)\s+(\S+)\s+(".*)$"#).expect("directive pattern"));

/// Unescapes a double-quoted selection pattern and compiles it.
fn compile_selection(quoted: &str) -> std::result::Result<Regex, String> {
    let pattern: String =
        serde_json::from_str(quoted).map_err(|_| format!("can't unquote {quoted}"))?;
    Regex::new(&pattern).map_err(|e| e.to_string())
}

/// Parses the query directives in the named fixture file.
///
/// Queries come back in source order so that repeated runs produce
/// diff-stable output. Malformed directives are returned as diagnostics and
/// never stop the scan; only an unreadable or unparsable file is an `Err`.
pub fn parse_queries(path: impl AsRef<Path>) -> Result<ParseOutcome> {
    let path = path.as_ref();
    let filename = path.to_string_lossy().into_owned();
    let content = fs::read_to_string(path)?;
    let language = Language::from_path(path);

    let comments = extract_comments(&content, &filename, language)?;
    let lines: Vec<&str> = content.split('\n').collect();

    let mut queries = Vec::new();
    let mut diagnostics = Vec::new();
    let mut seen: HashMap<String, Position> = HashMap::new();

    for comment in comments {
        let text = comment.body();
        if !text.starts_with('@') {
            continue;
        }
        let posn = comment.position.clone();

        let Some(captures) = DIRECTIVE_RE.captures(text) else {
            diagnostics.push(Diagnostic::new(posn, format!("ill-formed query: {text}")));
            continue;
        };
        let verb = &captures[1];
        let id = &captures[2];
        let quoted = &captures[3];

        if let Some(prev) = seen.get(id) {
            diagnostics.push(Diagnostic::new(posn, format!("duplicate id {id}")));
            diagnostics.push(Diagnostic::new(prev.clone(), "previously used here"));
            continue;
        }

        let select_re = match compile_selection(quoted) {
            Ok(re) => re,
            Err(msg) => {
                diagnostics.push(Diagnostic::new(posn, msg));
                continue;
            }
        };

        // Text of the directive's line, up to the comment itself. The
        // selection pattern must not match inside the directive.
        let line = lines.get(posn.line - 1).copied().unwrap_or("");
        let Some(prefix) = line.get(..posn.column - 1) else {
            diagnostics.push(Diagnostic::new(
                posn,
                "directive column is not a character boundary (multi-byte text on line?)",
            ));
            continue;
        };

        let Some(found) = select_re.find(prefix) else {
            diagnostics.push(Diagnostic::new(
                posn,
                format!("selection pattern {quoted} doesn't match line {prefix:?}"),
            ));
            continue;
        };

        // Byte offset of the line start; assumes single-byte columns.
        let line_start = posn.offset - (posn.column - 1);

        let query = Query {
            id: id.to_string(),
            verb: verb.to_string(),
            position: posn.clone(),
            filename: filename.clone(),
            start: line_start + found.start(),
            end: line_start + found.end(),
        };
        queries.push(query);
        seen.insert(id.to_string(), posn);
    }

    log::debug!(
        "{filename}: {} query(ies), {} diagnostic(s)",
        queries.len(),
        diagnostics.len()
    );
    Ok(ParseOutcome {
        queries,
        diagnostics,
    })
}
