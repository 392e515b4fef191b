//! @dose
//! purpose: Plain-text rendering of extraction results for reading in a terminal.
//!
//! when-editing:
//!     - !One header line per file, then one block per comment, in extraction order
//!     - Flag tags render as `@name` with no value
//!
//! invariants:
//!     - Output always ends with a newline unless there is nothing to print
//!
//! gotchas:
//!     - Comment lines keep their own indentation under the fixed four-space indent

use crate::formatter::FileComments;
use crate::types::{NormalizedComment, Tag, TagValue};

/// Render files and their comments as indented text
pub fn format_text(files: &[FileComments]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for file in files {
        lines.push(format!("{} ({} comments)", file.file, file.comments.len()));
        for comment in &file.comments {
            lines.extend(format_comment(comment));
        }
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn format_comment(comment: &NormalizedComment) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + comment.lines.len() + comment.tags.len());

    let mut header = format!("  L{}-{}", comment.start, comment.end);
    if comment.is_doc_block {
        header.push_str(" doc");
    }
    lines.push(header);

    for line in &comment.lines {
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("    {}", line));
        }
    }

    lines.extend(comment.tags.iter().map(|tag| format!("    {}", format_tag(tag))));
    lines
}

fn format_tag(tag: &Tag) -> String {
    match &tag.value {
        TagValue::Present(value) => format!("@{} {}", tag.name, value),
        TagValue::Flag => format!("@{}", tag.name),
    }
}
