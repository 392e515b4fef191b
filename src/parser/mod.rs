//! @dose
//! purpose: Parser adapters. A CommentParser turns source text into the ordered list of raw
//!     comments (value without delimiters plus 1-based line bounds); ParserFactory picks the
//!     right adapter for a file extension.
//!
//! when-editing:
//!     - !When adding a new dialect, register its extensions in ParserFactory::new()
//!     - !Adapters must be tolerant: syntax errors elsewhere never stop comment extraction
//!     - Each parser is stored as Arc<dyn CommentParser> for thread-safe sharing
//!
//! invariants:
//!     - Comments come back in source order
//!     - Every file extension maps to exactly one parser implementation
//!     - While parsing, only total failure to produce a syntax tree is a ParseError
//!
//! gotchas:
//!     - Extensions are stored without the leading dot (e.g., "js" not ".js")
//!     - .jsx goes through the JavaScript grammar, which already understands JSX

mod javascript;

use crate::types::RawComment;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub use javascript::{Dialect, JavaScriptParser};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to load grammar: {0}")]
    LanguageError(String),
    #[error("Failed to parse source: {0}")]
    ParseError(String),
    #[error("Unsupported language for extension: {0}")]
    UnsupportedLanguage(String),
}

/// Source of raw comments for one language
pub trait CommentParser: Send + Sync {
    /// Returns the language name (e.g., "javascript", "typescript")
    fn language_name(&self) -> &'static str;

    /// Returns file extensions this parser handles
    fn file_extensions(&self) -> &[&'static str];

    /// Collect every comment in `source`, in source order
    fn parse_comments(&self, source: &str) -> Result<Vec<RawComment>, ParseError>;
}

/// Factory mapping file extensions to comment parsers
pub struct ParserFactory {
    parsers: HashMap<String, Arc<dyn CommentParser>>,
}

impl ParserFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            parsers: HashMap::new(),
        };

        factory.register(Arc::new(JavaScriptParser::new(Dialect::JavaScript)));
        factory.register(Arc::new(JavaScriptParser::new(Dialect::TypeScript)));
        factory.register(Arc::new(JavaScriptParser::new(Dialect::Tsx)));

        factory
    }

    /// Register a parser for all of its extensions, replacing earlier registrations
    pub fn register(&mut self, parser: Arc<dyn CommentParser>) {
        for ext in parser.file_extensions() {
            self.parsers.insert(ext.to_string(), Arc::clone(&parser));
        }
    }

    /// Get parser for a file path based on extension
    pub fn get_parser(&self, file_path: &Path) -> Option<&dyn CommentParser> {
        let ext = file_path.extension()?.to_str()?;
        self.get_parser_by_ext(ext)
    }

    /// Like get_parser, but an unknown extension is an error
    pub fn parser_for(&self, file_path: &Path) -> Result<&dyn CommentParser, ParseError> {
        self.get_parser(file_path).ok_or_else(|| {
            let ext = file_path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            ParseError::UnsupportedLanguage(ext)
        })
    }

    /// Get parser by extension string
    pub fn get_parser_by_ext(&self, ext: &str) -> Option<&dyn CommentParser> {
        self.parsers
            .get(ext.trim_start_matches('.'))
            .map(|p| p.as_ref())
    }

    /// Check if a file extension is supported
    pub fn is_supported(&self, file_path: &Path) -> bool {
        self.get_parser(file_path).is_some()
    }

    /// Get all supported extensions
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.parsers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
