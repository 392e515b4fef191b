//! Edge trimming: drop blank entries from both ends of a line sequence.

/// An entry is blank when nothing but whitespace remains after trimming.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Sub-slice of `lines` without leading and trailing blank entries.
/// Interior blanks are kept; an all-blank input yields an empty slice.
pub fn trim_edges<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let Some(first) = lines.iter().position(|l| !is_blank(l.as_ref())) else {
        return &[];
    };
    // A non-blank entry exists, so rposition always finds one
    let last = lines
        .iter()
        .rposition(|l| !is_blank(l.as_ref()))
        .unwrap_or(first);
    &lines[first..=last]
}

/// Owned variant of [`trim_edges`].
pub fn trim_edges_owned(mut lines: Vec<String>) -> Vec<String> {
    let Some(first) = lines.iter().position(|l| !is_blank(l)) else {
        return Vec::new();
    };
    let last = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(first);
    lines.truncate(last + 1);
    lines.drain(..first);
    lines
}
