//! @dose
//! purpose: tree-sitter adapter that lists the comments of JavaScript, TypeScript and TSX
//!     sources. tree-sitter keeps going past syntax errors, so comments around broken code are
//!     still reported.
//!
//! when-editing:
//!     - !Comment values exclude the delimiters (`//`, `/*`, `*/`, `<!--`, `-->`)
//!     - !Lines are reported 1-based; tree-sitter rows are 0-based
//!
//! invariants:
//!     - Comments are collected in a pre-order walk, which is source order
//!     - ParseError is returned only when the grammar fails to load or no tree is produced
//!
//! gotchas:
//!     - Columns in CommentNode are byte offsets, as tree-sitter reports them
//!     - A comment swallowed by an unterminated construct (e.g. inside a broken string) is lost

use crate::parser::{CommentParser, ParseError};
use crate::types::{CommentKind, CommentNode, Location, Position, RawComment};
use tree_sitter::{Node, Parser, Point, TreeCursor};

/// Grammar variant used for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    JavaScript,
    TypeScript,
    Tsx,
}

/// Comment parser for JavaScript-family sources
#[derive(Debug, Clone)]
pub struct JavaScriptParser {
    dialect: Dialect,
}

impl JavaScriptParser {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        let language = match self.dialect {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };
        parser
            .set_language(&language)
            .map_err(|e| ParseError::LanguageError(e.to_string()))?;
        Ok(parser)
    }
}

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new(Dialect::JavaScript)
    }
}

impl CommentParser for JavaScriptParser {
    fn language_name(&self) -> &'static str {
        match self.dialect {
            Dialect::JavaScript => "javascript",
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }

    fn file_extensions(&self) -> &[&'static str] {
        match self.dialect {
            Dialect::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Dialect::TypeScript => &["ts", "mts", "cts"],
            Dialect::Tsx => &["tsx"],
        }
    }

    fn parse_comments(&self, source: &str) -> Result<Vec<RawComment>, ParseError> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::ParseError("Failed to parse source".to_string()))?;

        let mut comments = Vec::new();
        let mut cursor = tree.walk();
        collect_comments(&mut cursor, source, &mut comments);

        tracing::debug!(
            language = self.language_name(),
            comments = comments.len(),
            has_errors = tree.root_node().has_error(),
            "collected comments"
        );

        Ok(comments)
    }
}

/// Collect comment nodes in document order, walking the tree without recursion
fn collect_comments(cursor: &mut TreeCursor, source: &str, comments: &mut Vec<RawComment>) {
    loop {
        let node = cursor.node();
        let is_comment = matches!(node.kind(), "comment" | "html_comment");
        if is_comment {
            comments.push(raw_comment(node, source));
        }

        if !is_comment && cursor.goto_first_child() {
            continue;
        }

        // Climb until a sibling exists; back at the root means the walk is done
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn raw_comment(node: Node, source: &str) -> RawComment {
    let text = &source[node.start_byte()..node.end_byte()];
    let (kind, value) = split_delimiters(text);

    let start = node.start_position();
    let end = node.end_position();

    RawComment::new(value, start.row + 1, end.row + 1).with_node(CommentNode {
        kind,
        range: (node.start_byte(), node.end_byte()),
        loc: Location {
            start: position(start),
            end: position(end),
        },
    })
}

fn position(point: Point) -> Position {
    Position {
        line: point.row + 1,
        column: point.column,
    }
}

/// Separate the comment body from its delimiters
fn split_delimiters(text: &str) -> (CommentKind, &str) {
    if let Some(body) = text.strip_prefix("/*") {
        return (CommentKind::Block, body.strip_suffix("*/").unwrap_or(body));
    }

    let body = text
        .strip_prefix("//")
        .or_else(|| text.strip_prefix("<!--"))
        .or_else(|| text.strip_prefix("-->"))
        .unwrap_or(text);
    // tree-sitter can include the CR of a CRLF line ending in a line comment
    (CommentKind::Line, body.strip_suffix('\r').unwrap_or(body))
}
