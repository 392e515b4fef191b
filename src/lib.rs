//! @dose
//! purpose: Library crate root for jscomments. Turns JavaScript/TypeScript source into a list of
//!     normalized comments (clean text lines plus JSDoc-style tags) and exposes the pipeline
//!     pieces for callers that bring their own parser.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - !Re-exports should include commonly used types and functions
//!     - Keep the re-export list organized by module
//!
//! invariants:
//!     - extract_comments is a pure function of (source, options); no global state
//!     - The public API surface is stable - all re-exported items are public contract
//!
//! gotchas:
//!     - The lib.rs is separate from main.rs - library consumers get lib, CLI gets main

pub mod cli;
pub mod commands;
pub mod config;
pub mod extract;
pub mod formatter;
pub mod normalize;
pub mod options;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use cli::{Cli, Commands, ExtractArgs};
pub use extract::{assemble, assemble_all, extract_comments, extract_comments_with};
pub use formatter::{format_json, format_text, FileComments, OutputFormat};
pub use options::{ExtractOptions, ResolvedOptions, TrimPolicy};
pub use parser::{CommentParser, Dialect, JavaScriptParser, ParseError, ParserFactory};
pub use types::{
    CommentKind, CommentNode, Location, NormalizedComment, Position, RawComment, Tag, TagValue,
};
