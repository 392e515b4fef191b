//! @dose
//! purpose: Extraction options. Callers supply an ExtractOptions where every field is optional;
//!     it is resolved exactly once per call into ResolvedOptions carrying concrete values.
//!
//! when-editing:
//!     - !A default applies only when the caller left a field unset; an explicit false is kept
//!     - TrimPolicy accepts booleans as well as names so `trim = false` in config means None
//!
//! invariants:
//!     - ResolvedOptions::default() equals ExtractOptions::default().resolve()
//!
//! gotchas:
//!     - "right" is accepted as an alias of "right-only"

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-line trimming applied by the line normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimPolicy {
    /// Trim both ends
    #[default]
    Full,
    /// Trim trailing whitespace only
    RightOnly,
    /// Leave lines as they are
    None,
}

impl TrimPolicy {
    pub fn apply<'a>(&self, line: &'a str) -> &'a str {
        match self {
            TrimPolicy::Full => line.trim(),
            TrimPolicy::RightOnly => line.trim_end(),
            TrimPolicy::None => line,
        }
    }
}

impl FromStr for TrimPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" | "true" => Ok(TrimPolicy::Full),
            "right-only" | "right" => Ok(TrimPolicy::RightOnly),
            "none" | "false" | "" => Ok(TrimPolicy::None),
            other => Err(format!(
                "unknown trim policy '{}' (expected full, right-only or none)",
                other
            )),
        }
    }
}

impl fmt::Display for TrimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrimPolicy::Full => "full",
            TrimPolicy::RightOnly => "right-only",
            TrimPolicy::None => "none",
        })
    }
}

impl<'de> Deserialize<'de> for TrimPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TrimValue {
            Bool(bool),
            Name(String),
        }

        match TrimValue::deserialize(deserializer)? {
            TrimValue::Bool(true) => Ok(TrimPolicy::Full),
            TrimValue::Bool(false) => Ok(TrimPolicy::None),
            TrimValue::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

/// Caller-facing options; unset fields fall back to documented defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Attach parser metadata to each comment (default: false)
    pub include_parser_node: Option<bool>,
    /// Run tag extraction (default: true)
    pub parse_tags: Option<bool>,
    /// Drop tag lines from `lines` when tags are parsed (default: true)
    pub remove_tag_lines: Option<bool>,
    /// Per-line trim policy (default: full)
    pub trim: Option<TrimPolicy>,
}

impl ExtractOptions {
    /// Fill fields left unset here from `fallback`
    pub fn or(&self, fallback: &ExtractOptions) -> ExtractOptions {
        ExtractOptions {
            include_parser_node: self.include_parser_node.or(fallback.include_parser_node),
            parse_tags: self.parse_tags.or(fallback.parse_tags),
            remove_tag_lines: self.remove_tag_lines.or(fallback.remove_tag_lines),
            trim: self.trim.or(fallback.trim),
        }
    }

    pub fn resolve(&self) -> ResolvedOptions {
        let defaults = ResolvedOptions::default();
        ResolvedOptions {
            include_parser_node: self
                .include_parser_node
                .unwrap_or(defaults.include_parser_node),
            parse_tags: self.parse_tags.unwrap_or(defaults.parse_tags),
            remove_tag_lines: self.remove_tag_lines.unwrap_or(defaults.remove_tag_lines),
            trim: self.trim.unwrap_or(defaults.trim),
        }
    }
}

/// Options with every default applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub include_parser_node: bool,
    pub parse_tags: bool,
    pub remove_tag_lines: bool,
    pub trim: TrimPolicy,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            include_parser_node: false,
            parse_tags: true,
            remove_tag_lines: true,
            trim: TrimPolicy::Full,
        }
    }
}
