//! @dose
//! purpose: Core data types flowing through the extraction pipeline: the raw comment records
//!     handed over by a parser, and the normalized records handed back to callers.
//!
//! when-editing:
//!     - !NormalizedComment's JSON shape (start, end, lines, jsDoc, tags, node) is public contract
//!     - !TagValue serializes as a JSON string or the literal true, never as an object
//!
//! invariants:
//!     - RawComment and NormalizedComment are per-call values; nothing here is shared
//!     - A Tag's value is Flag exactly when no text followed the tag name
//!
//! gotchas:
//!     - CommentNode columns are byte offsets, lines are 1-based

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comment syntax as reported by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...` (and HTML-like `<!--` / `-->` comments)
    Line,
    /// `/* ... */`
    Block,
}

/// Line/column pair; line is 1-based, column is a 0-based byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Source span of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

/// Parser metadata for a comment, only attached to output when requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    /// Byte range of the whole comment including delimiters
    pub range: (usize, usize),
    pub loc: Location,
}

/// A comment as discovered by a parser, delimiters already removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub value: String,
    pub start_line: usize,
    pub end_line: usize,
    pub node: Option<CommentNode>,
}

impl RawComment {
    pub fn new(value: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            value: value.into(),
            start_line,
            end_line,
            node: None,
        }
    }

    pub fn with_node(mut self, node: CommentNode) -> Self {
        self.node = Some(node);
        self
    }
}

/// Value of a documentation tag.
///
/// `@since 1.2` carries `Present("1.2")`, a bare `@deprecated` carries `Flag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Present(String),
    Flag,
}

impl TagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Present(s) => Some(s),
            TagValue::Flag => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, TagValue::Flag)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Present(s) => f.write_str(s),
            TagValue::Flag => f.write_str("true"),
        }
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Present(s) => serializer.serialize_str(s),
            TagValue::Flag => serializer.serialize_bool(true),
        }
    }
}

impl<'de> Deserialize<'de> for TagValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Bool(bool),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Ok(TagValue::Present(s)),
            Repr::Bool(true) => Ok(TagValue::Flag),
            Repr::Bool(false) => Err(de::Error::custom("tag value must be a string or true")),
        }
    }
}

/// A documentation tag such as `@param {string} x`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: TagValue,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: TagValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The cleaned-up form of one comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedComment {
    pub start: usize,
    pub end: usize,
    pub lines: Vec<String>,
    #[serde(rename = "jsDoc")]
    pub is_doc_block: bool,
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<CommentNode>,
}

impl NormalizedComment {
    /// Tags with the given name, in source order
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }
}
