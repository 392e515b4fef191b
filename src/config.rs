//! @dose
//! purpose: Configuration file parsing for jscomments.toml. Holds exclusion patterns for
//!     directory walks and project-wide extraction options.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed through the call chain
//!     - !CLI flags override [options] here; [options] overrides built-in defaults
//!     - `trim = false` in TOML means no trimming, `trim = true` means full
//!
//! invariants:
//!     - Config::load returns default config if jscomments.toml doesn't exist
//!     - A broken config file is reported and ignored, never fatal
//!
//! gotchas:
//!     - Patterns are matched against paths relative to project root

use crate::options::ExtractOptions;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "jscomments.toml";

/// Main configuration structure matching jscomments.toml
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Exclusion patterns (globs relative to the root)
    pub exclude: Vec<String>,

    /// Extraction options applied to every file
    pub options: ExtractOptions,
}

impl Config {
    /// Load configuration from jscomments.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), "Failed to parse config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "Failed to read config: {}", e);
                Self::default()
            }
        }
    }
}

/// Build a GlobSet from exclusion patterns; invalid patterns are skipped with a warning
pub fn build_exclude_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!("invalid exclude pattern '{}': {}", pattern, e);
            }
        }
    }

    builder.build().ok()
}
