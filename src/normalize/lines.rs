//! @dose
//! purpose: Line normalization for a raw comment body: line-ending normalization, splitting,
//!     doc-block marker stripping, per-line trimming and edge trimming.
//!
//! when-editing:
//!     - !Doc-block detection looks at the first line before any stripping
//!     - !Marker stripping is all-or-nothing per comment, never decided per line
//!     - Markers are stripped for doc blocks and for multi-line comments with a `*` margin
//!
//! invariants:
//!     - Output never starts or ends with a blank entry
//!     - Only one leading `*` (after optional whitespace) is removed per line
//!
//! gotchas:
//!     - A lone `\r` is not a line break; it is whitespace and goes away under trimming

use super::edges::{is_blank, trim_edges_owned};
use crate::options::TrimPolicy;
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*").unwrap());

/// Split a comment body into lines, treating CRLF and LF alike
pub fn split_lines(value: &str) -> Vec<&str> {
    value.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
}

/// True when the first line of the body, trimmed, is exactly `*`
pub fn is_doc_block(value: &str) -> bool {
    split_lines(value)
        .first()
        .map(|first| first.trim() == "*")
        .unwrap_or(false)
}

/// True when a multi-line body has a `*` at the start of every non-blank line,
/// as in a block comment written without the opening doc-block line
pub fn has_star_margin(value: &str) -> bool {
    let lines = split_lines(value);
    lines.len() > 1
        && lines
            .iter()
            .filter(|l| !is_blank(l))
            .all(|l| LEADING_MARKER.is_match(l))
}

/// Whether leading `*` markers are removed from this comment's lines
pub fn strips_markers(value: &str) -> bool {
    is_doc_block(value) || has_star_margin(value)
}

/// Remove a single leading `*` preceded by optional whitespace
pub fn strip_leading_marker(line: &str) -> &str {
    match LEADING_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Normalize a comment body into edge-trimmed lines
pub fn normalize_lines(value: &str, strip_markers: bool, trim: TrimPolicy) -> Vec<String> {
    let lines = split_lines(value)
        .into_iter()
        .map(|line| {
            let line = if strip_markers {
                strip_leading_marker(line)
            } else {
                line
            };
            trim.apply(line).to_string()
        })
        .collect();

    trim_edges_owned(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_doc_block() {
        assert!(is_doc_block("*\n * Hello"));
        assert!(is_doc_block("  *  \n"));
        assert!(is_doc_block("*"));
        assert!(is_doc_block("*\r\n * crlf"));
        assert!(!is_doc_block(" not a doc block "));
        assert!(!is_doc_block("** \n"));
        assert!(!is_doc_block("* text on first line\n"));
        assert!(!is_doc_block(""));
    }

    #[test]
    fn test_split_lines_normalizes_crlf() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\rb"), vec!["a\rb"]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_strip_leading_marker_once() {
        assert_eq!(strip_leading_marker(" * Hello"), " Hello");
        assert_eq!(strip_leading_marker("** bold"), "* bold");
        assert_eq!(strip_leading_marker("\t*x"), "x");
        assert_eq!(strip_leading_marker("no marker *"), "no marker *");
    }

    #[test]
    fn test_normalize_doc_block_full_trim() {
        let lines = normalize_lines(
            "*\n * Hello world\n * @param {string} x\n ",
            true,
            TrimPolicy::Full,
        );
        assert_eq!(lines, vec!["Hello world", "@param {string} x"]);
    }

    #[test]
    fn test_star_margin() {
        assert!(has_star_margin("* A\n * @x 1\n * B"));
        assert!(has_star_margin(" * A\n\n * B\n "));
        assert!(!has_star_margin(" * single line"));
        assert!(!has_star_margin("first\n * second"));

        assert!(strips_markers("*\n plain second line"));
        assert!(strips_markers("* A\n * B"));
        assert!(!strips_markers(" * single line"));
        assert!(!strips_markers("a\nb"));
    }

    #[test]
    fn test_normalize_without_stripping_keeps_markers() {
        let body = " * starts with star";
        let lines = normalize_lines(body, strips_markers(body), TrimPolicy::Full);
        assert_eq!(lines, vec!["* starts with star"]);

        let body = "first\n * second";
        let lines = normalize_lines(body, strips_markers(body), TrimPolicy::Full);
        assert_eq!(lines, vec!["first", "* second"]);
    }

    #[test]
    fn test_normalize_star_margin_comment() {
        let body = "* A\n * @x 1\n * B";
        let lines = normalize_lines(body, strips_markers(body), TrimPolicy::Full);
        assert_eq!(lines, vec!["A", "@x 1", "B"]);
    }

    #[test]
    fn test_normalize_trim_policies() {
        let body = "*\n *   indented  \n";
        assert_eq!(
            normalize_lines(body, true, TrimPolicy::Full),
            vec!["indented"]
        );
        assert_eq!(
            normalize_lines(body, true, TrimPolicy::RightOnly),
            vec!["   indented"]
        );
        assert_eq!(
            normalize_lines(body, true, TrimPolicy::None),
            vec!["   indented  "]
        );
    }

    #[test]
    fn test_normalize_all_blank_under_every_policy() {
        for trim in [TrimPolicy::Full, TrimPolicy::RightOnly, TrimPolicy::None] {
            assert!(normalize_lines("*\n \n ", true, trim).is_empty());
            assert!(normalize_lines("", false, trim).is_empty());
        }
    }

    #[test]
    fn test_normalize_untrimmed_preserves_content() {
        let body = "*\r\n * A  \r\n *   B\r\n";
        assert_eq!(
            normalize_lines(body, true, TrimPolicy::None),
            vec![" A  ", "   B"]
        );
    }
}
