//! Tag extraction: `@name value` lines in a normalized comment body.

use super::edges::trim_edges_owned;
use crate::types::{Tag, TagValue};

/// Tags found in a comment body plus the lines to keep
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedTags {
    pub tags: Vec<Tag>,
    pub lines: Vec<String>,
}

/// Parse a single line as a tag. Only lines whose first character is `@` qualify.
pub fn parse_tag_line(line: &str) -> Option<Tag> {
    let rest = line.strip_prefix('@')?;

    let (name, value) = match rest.find(' ') {
        Some(pos) => (&rest[..pos], &rest[pos..]),
        None => (rest, ""),
    };

    let value = value.trim();
    let value = if value.is_empty() {
        TagValue::Flag
    } else {
        TagValue::Present(value.to_string())
    };

    Some(Tag::new(name.trim(), value))
}

/// Collect tags from `lines` in order. With `remove_tag_lines` the tag lines are
/// dropped and the remainder edge-trimmed; otherwise `lines` comes back unchanged.
pub fn extract_tags(lines: Vec<String>, remove_tag_lines: bool) -> ExtractedTags {
    let mut tags = Vec::new();
    let mut kept = Vec::with_capacity(lines.len());

    for line in &lines {
        match parse_tag_line(line) {
            Some(tag) => tags.push(tag),
            None => kept.push(line.clone()),
        }
    }

    let lines = if remove_tag_lines {
        trim_edges_owned(kept)
    } else {
        lines
    };

    ExtractedTags { tags, lines }
}
