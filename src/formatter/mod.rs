//! Output rendering for the CLI: JSON for tools, indented text for people.

mod text;

use crate::types::NormalizedComment;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use text::format_text;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Comments extracted from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileComments {
    /// Path relative to the project root, or `-` for stdin
    pub file: String,
    pub comments: Vec<NormalizedComment>,
}

/// Serialize any result to JSON, pretty-printed on request
pub fn format_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
