//! @dose
//! purpose: This module defines the command-line interface for jscomments using the clap derive
//!     macros. It specifies the extract command and its arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - Extraction flags stay unset unless given, so jscomments.toml can fill them in
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line arguments
//!     - PathBuf is used for all file/directory path arguments to ensure proper path handling
//!
//! gotchas:
//!     - The extract command accepts "-" as input to read from stdin
//!     - The --root flag is global but optional; defaults to current directory in main.rs

use crate::formatter::OutputFormat;
use crate::options::{ExtractOptions, TrimPolicy};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jscomments")]
#[command(author, version, about = "Extract normalized comments and JSDoc tags from JavaScript")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract comments from source files, directories or stdin
    Extract(ExtractArgs),
}

#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Files or directories to process ("-" reads stdin)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Language extension hint when reading from stdin
    #[arg(long, default_value = "js")]
    pub ext: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Attach parser metadata (comment type, byte range, location) to each comment
    #[arg(long, overrides_with = "no_include_node")]
    pub include_node: bool,

    /// Leave parser metadata out
    #[arg(long, overrides_with = "include_node")]
    pub no_include_node: bool,

    /// Parse @tags
    #[arg(long, overrides_with = "no_tags")]
    pub tags: bool,

    /// Do not parse @tags
    #[arg(long, overrides_with = "tags")]
    pub no_tags: bool,

    /// Keep @tag lines in the comment text
    #[arg(long, overrides_with = "remove_tag_lines")]
    pub keep_tag_lines: bool,

    /// Drop @tag lines from the comment text
    #[arg(long, overrides_with = "keep_tag_lines")]
    pub remove_tag_lines: bool,

    /// Per-line trimming: full, right-only or none
    #[arg(long, value_name = "POLICY")]
    pub trim: Option<TrimPolicy>,

    /// Exclude files/directories matching glob pattern (can be repeated)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

impl ExtractArgs {
    /// Options given explicitly on the command line; everything else stays unset
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_parser_node: flag_pair(self.include_node, self.no_include_node),
            parse_tags: flag_pair(self.tags, self.no_tags),
            remove_tag_lines: flag_pair(self.remove_tag_lines, self.keep_tag_lines),
            trim: self.trim,
        }
    }

    /// True when input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        self.paths.len() == 1 && self.paths[0].as_os_str() == "-"
    }
}

/// `--x` gives Some(true), `--no-x` Some(false), neither leaves the option unset
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
