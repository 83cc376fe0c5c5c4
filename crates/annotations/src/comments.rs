use crate::error::{AnnotationError, Result};
use crate::language::Language;
use crate::types::Position;
use tree_sitter::{Node, Parser};

/// One comment found in a fixture source, with the position of its first byte
#[derive(Debug, Clone)]
pub struct CommentSpan {
    /// Raw comment text, markers included
    pub text: String,

    /// Position of the comment's opening marker
    pub position: Position,
}

impl CommentSpan {
    /// Comment text with the language's markers stripped and whitespace
    /// trimmed, the form directive matching runs against.
    pub fn body(&self) -> &str {
        let text = self.text.as_str();
        let inner = if let Some(rest) = text.strip_prefix("//") {
            rest
        } else if let Some(rest) = text.strip_prefix("/*") {
            rest.strip_suffix("*/").unwrap_or(rest)
        } else if let Some(rest) = text.strip_prefix('#') {
            rest
        } else {
            text
        };
        inner.trim()
    }
}

/// Extracts every comment from `content` in source order.
///
/// Positions are 1-indexed; columns count bytes, matching tree-sitter's
/// point columns.
pub fn extract_comments(
    content: &str,
    filename: &str,
    language: Language,
) -> Result<Vec<CommentSpan>> {
    let ts_language = language.tree_sitter_language()?;
    let mut parser = Parser::new();
    parser
        .set_language(&ts_language)
        .map_err(|e| AnnotationError::tree_sitter(format!("Failed to set language: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| AnnotationError::parse("Failed to parse fixture source"))?;

    let mut comments = Vec::new();
    collect_comments(
        content,
        filename,
        tree.root_node(),
        language.comment_node_kinds(),
        &mut comments,
    );

    // Tree order is source order already; keep it stable regardless.
    comments.sort_by_key(|c| c.position.offset);
    Ok(comments)
}

fn collect_comments(
    content: &str,
    filename: &str,
    node: Node,
    kinds: &[&str],
    comments: &mut Vec<CommentSpan>,
) {
    if kinds.contains(&node.kind()) {
        let text = node
            .utf8_text(content.as_bytes())
            .unwrap_or_default()
            .to_string();
        let point = node.start_position();
        comments.push(CommentSpan {
            text,
            position: Position {
                file: filename.to_string(),
                line: point.row + 1,
                column: point.column + 1,
                offset: node.start_byte(),
            },
        });
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(content, filename, child, kinds, comments);
    }
}
