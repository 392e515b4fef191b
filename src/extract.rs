//! @dose
//! purpose: Comment assembly. Runs line normalization and tag extraction for every raw comment
//!     and builds the NormalizedComment records returned by extract_comments.
//!
//! when-editing:
//!     - !Options are resolved once per call, before the first comment is processed
//!     - !Output order is the parser's order; never sort or dedupe here
//!
//! invariants:
//!     - parse_tags=false means no tags and no line removal
//!     - Only a parser failure can make extraction fail; assembly itself is total
//!
//! flows:
//!     - extract_comments: JavaScript parser -> assemble_all
//!     - extract_comments_with: caller-supplied parser -> assemble_all

use crate::normalize::{extract_tags, is_doc_block, normalize_lines, strips_markers};
use crate::options::{ExtractOptions, ResolvedOptions};
use crate::parser::{CommentParser, JavaScriptParser, ParseError};
use crate::types::{NormalizedComment, RawComment};

/// Extract normalized comments from JavaScript source
pub fn extract_comments(
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<NormalizedComment>, ParseError> {
    extract_comments_with(&JavaScriptParser::default(), source, options)
}

/// Extract normalized comments using the given parser
pub fn extract_comments_with(
    parser: &dyn CommentParser,
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<NormalizedComment>, ParseError> {
    let options = options.resolve();
    let raw = parser.parse_comments(source)?;
    Ok(assemble_all(raw, &options))
}

/// Assemble every raw comment, keeping input order
pub fn assemble_all(raw: Vec<RawComment>, options: &ResolvedOptions) -> Vec<NormalizedComment> {
    raw.into_iter()
        .map(|comment| assemble(comment, options))
        .collect()
}

/// Build the normalized record for one raw comment
pub fn assemble(raw: RawComment, options: &ResolvedOptions) -> NormalizedComment {
    let is_doc_block = is_doc_block(&raw.value);
    let mut lines = normalize_lines(&raw.value, strips_markers(&raw.value), options.trim);
    let mut tags = Vec::new();

    if options.parse_tags {
        let extracted = extract_tags(lines, options.remove_tag_lines);
        lines = extracted.lines;
        tags = extracted.tags;
    }

    NormalizedComment {
        start: raw.start_line,
        end: raw.end_line,
        lines,
        is_doc_block,
        tags,
        node: if options.include_parser_node {
            raw.node
        } else {
            None
        },
    }
}
