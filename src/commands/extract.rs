//! @dose
//! purpose: This module implements the extract command: it gathers source files (or stdin),
//!     runs comment extraction on each and writes the results as JSON or text.
//!
//! when-editing:
//!     - !Options are layered CLI flags > jscomments.toml [options] > built-in defaults
//!     - !Output order follows the sorted file list, regardless of parallel processing
//!     - Language detection uses file extension or --ext flag
//!
//! invariants:
//!     - A file that fails to read or parse is reported and counted, other files still run
//!     - The command fails if any file failed
//!     - Directory walks never enter node_modules, .git, target, dist or build
//!
//! gotchas:
//!     - Explicitly named files are processed even when their extension is unknown (and fail)
//!     - Exclude patterns match paths relative to the root
//!
//! flows:
//!     - Collect: expand paths into a sorted, de-duplicated file list
//!     - Extract: parse each file in parallel and normalize its comments
//!     - Write: render JSON or text to the output file or stdout

use crate::cli::ExtractArgs;
use crate::config::{build_exclude_globset, Config};
use crate::extract::extract_comments_with;
use crate::formatter::{format_json, format_text, FileComments, OutputFormat};
use crate::options::ExtractOptions;
use crate::parser::{ParseError, ParserFactory};
use anyhow::{Context, Result};
use globset::GlobSet;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub fn run_extract(args: &ExtractArgs, root: &Path) -> Result<()> {
    let factory = ParserFactory::new();
    let config = Config::load(root);
    let options = args.extract_options().or(&config.options);

    tracing::debug!(?options, "resolved extraction options");

    if args.reads_stdin() {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read from stdin")?;
        let rendered = render_stdin(&source, &args.ext, &factory, &options, args)?;
        return write_output(args, root, &rendered);
    }

    let mut patterns = config.exclude.clone();
    patterns.extend(args.exclude.iter().cloned());
    let excludes = build_exclude_globset(&patterns);

    let files = collect_files(&args.paths, root, excludes.as_ref(), &factory);
    tracing::debug!("Extracting comments from {} files", files.len());

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, process_file(path, root, &factory, &options)))
        .collect();

    let mut extracted = Vec::with_capacity(results.len());
    let mut errors = 0;
    for (path, result) in results {
        match result {
            Ok(file) => extracted.push(file),
            Err(e) => {
                tracing::error!("Error processing {}: {:#}", path.display(), e);
                errors += 1;
            }
        }
    }

    let rendered = render_files(&extracted, args)?;
    write_output(args, root, &rendered)?;

    if errors > 0 {
        anyhow::bail!("{} files failed to process", errors);
    }

    Ok(())
}

/// Extract comments from stdin content; JSON output is a bare comment array
fn render_stdin(
    source: &str,
    ext: &str,
    factory: &ParserFactory,
    options: &ExtractOptions,
    args: &ExtractArgs,
) -> Result<String> {
    let parser = factory
        .get_parser_by_ext(ext)
        .ok_or_else(|| ParseError::UnsupportedLanguage(ext.to_string()))?;
    let comments = extract_comments_with(parser, source, options)?;

    match args.format {
        OutputFormat::Json => Ok(format_json(&comments, args.pretty)?),
        OutputFormat::Text => Ok(format_text(&[FileComments {
            file: "-".to_string(),
            comments,
        }])),
    }
}

fn render_files(files: &[FileComments], args: &ExtractArgs) -> Result<String> {
    match args.format {
        OutputFormat::Json => Ok(format_json(files, args.pretty)?),
        OutputFormat::Text => Ok(format_text(files)),
    }
}

fn write_output(args: &ExtractArgs, root: &Path, rendered: &str) -> Result<()> {
    if let Some(ref output) = args.output {
        let output_path = if output.is_absolute() {
            output.clone()
        } else {
            root.join(output)
        };

        let mut content = rendered.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        fs::write(&output_path, content).context("Failed to write output file")?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
        if !rendered.ends_with('\n') {
            stdout.write_all(b"\n").context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Read and extract one file
pub fn process_file(
    path: &Path,
    root: &Path,
    factory: &ParserFactory,
    options: &ExtractOptions,
) -> Result<FileComments> {
    let parser = factory.parser_for(path)?;

    let source = fs::read_to_string(path).context("Failed to read source file")?;
    let comments = extract_comments_with(parser, &source, options)?;

    tracing::debug!(
        file = %path.display(),
        language = parser.language_name(),
        comments = comments.len(),
        "extracted"
    );

    Ok(FileComments {
        file: relative_display(path, root),
        comments,
    })
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Expand input paths into a sorted, de-duplicated list of files
pub fn collect_files(
    paths: &[PathBuf],
    root: &Path,
    excludes: Option<&GlobSet>,
    factory: &ParserFactory,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let paths = if paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        paths.to_vec()
    };

    let is_excluded = |path: &Path| {
        excludes
            .map(|set| set.is_match(path.strip_prefix(root).unwrap_or(path)))
            .unwrap_or(false)
    };

    for path in paths {
        let full_path = if path.is_absolute() {
            path
        } else {
            root.join(&path)
        };

        if full_path.is_file() {
            files.push(full_path);
        } else if full_path.is_dir() {
            for entry in WalkDir::new(&full_path)
                .follow_links(true)
                .into_iter()
                .filter_entry(|e| !is_excluded_dir(e) && !is_excluded(e.path()))
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && factory.is_supported(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            tracing::warn!("Skipping {}: no such file or directory", full_path.display());
        }
    }

    // Deterministic ordering + de-dup (e.g. overlapping input paths)
    files.sort();
    files.dedup();
    files
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    matches!(
        entry.file_name().to_string_lossy().as_ref(),
        "node_modules" | ".git" | "target" | "dist" | "build"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TagValue;
    use tempfile::TempDir;

    fn args_with(paths: Vec<PathBuf>, output: &str) -> ExtractArgs {
        ExtractArgs {
            paths,
            ext: "js".to_string(),
            output: Some(PathBuf::from(output)),
            ..Default::default()
        }
    }

    // ==================== collect_files Tests ====================

    #[test]
    fn test_collect_files_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();

        let files = collect_files(&[], temp_dir.path(), None, &factory);
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_files_with_supported_files() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();

        fs::write(temp_dir.path().join("main.js"), "// a").unwrap();
        fs::write(temp_dir.path().join("types.ts"), "// b").unwrap();
        fs::write(temp_dir.path().join("readme.md"), "# Readme").unwrap();

        let files = collect_files(&[], temp_dir.path(), None, &factory);
        // Should find .js and .ts but not .md
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("main.js"));
        assert!(files[1].ends_with("types.ts"));
    }

    #[test]
    fn test_collect_files_excludes_default_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();

        for dir in ["node_modules/pkg", ".git", "dist", "src"] {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
            fs::write(temp_dir.path().join(dir).join("index.js"), "// x").unwrap();
        }

        let files = collect_files(&[], temp_dir.path(), None, &factory);
        assert_eq!(files, vec![temp_dir.path().join("src/index.js")]);
    }

    #[test]
    fn test_collect_files_exclude_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();

        fs::create_dir_all(temp_dir.path().join("vendor")).unwrap();
        fs::write(temp_dir.path().join("vendor/lib.js"), "// v").unwrap();
        fs::write(temp_dir.path().join("app.min.js"), "// m").unwrap();
        fs::write(temp_dir.path().join("app.js"), "// a").unwrap();

        let excludes =
            build_exclude_globset(&["vendor/**".to_string(), "**/*.min.js".to_string()]);
        let files = collect_files(&[], temp_dir.path(), excludes.as_ref(), &factory);
        assert_eq!(files, vec![temp_dir.path().join("app.js")]);
    }

    #[test]
    fn test_collect_files_dedups_overlapping_paths() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();

        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src/a.js"), "// a").unwrap();

        let files = collect_files(
            &[PathBuf::from("src"), PathBuf::from("src/a.js")],
            temp_dir.path(),
            None,
            &factory,
        );
        assert_eq!(files.len(), 1);
    }

    // ==================== process_file Tests ====================

    #[test]
    fn test_process_file() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();
        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        let path = temp_dir.path().join("src/lib.js");
        fs::write(&path, "/**\n * Lib.\n * @since 2.0\n */\nexport {};\n").unwrap();

        let file = process_file(&path, temp_dir.path(), &factory, &ExtractOptions::default())
            .unwrap();
        assert_eq!(file.file, "src/lib.js");
        assert_eq!(file.comments.len(), 1);
        assert_eq!(file.comments[0].lines, vec!["Lib."]);
        assert_eq!(
            file.comments[0].tags[0].value,
            TagValue::Present("2.0".to_string())
        );
    }

    #[test]
    fn test_process_file_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "// not js").unwrap();

        let result = process_file(&path, temp_dir.path(), &factory, &ExtractOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_process_file_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ParserFactory::new();
        let path = temp_dir.path().join("bad.js");
        fs::write(&path, [0x2f, 0x2f, 0xff, 0xfe]).unwrap();

        let result = process_file(&path, temp_dir.path(), &factory, &ExtractOptions::default());
        assert!(result.is_err());
    }

    // ==================== run_extract Tests ====================

    #[test]
    fn test_run_extract_json_output() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("a.js"),
            "/**\n * A\n * @x 1\n */\nconst a = 1;\n",
        )
        .unwrap();

        let args = args_with(vec![], "out.json");
        run_extract(&args, temp_dir.path()).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("out.json")).unwrap();
        let files: Vec<FileComments> = serde_json::from_str(&output).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file, "a.js");
        assert_eq!(files[0].comments[0].lines, vec!["A"]);
    }

    #[test]
    fn test_run_extract_config_options_apply() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("jscomments.toml"),
            "[options]\nremove_tag_lines = false\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("a.js"),
            "/**\n * A\n * @x 1\n */\nconst a = 1;\n",
        )
        .unwrap();

        let args = args_with(vec![], "out.json");
        run_extract(&args, temp_dir.path()).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("out.json")).unwrap();
        let files: Vec<FileComments> = serde_json::from_str(&output).unwrap();
        assert_eq!(files[0].comments[0].lines, vec!["A", "@x 1"]);
    }

    #[test]
    fn test_run_extract_cli_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("jscomments.toml"),
            "[options]\nparse_tags = true\ntrim = \"full\"\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("a.js"),
            "/**\n *   A\n * @x 1\n */\n",
        )
        .unwrap();

        let mut args = args_with(vec![], "out.json");
        args.no_tags = true;
        args.trim = Some(crate::options::TrimPolicy::RightOnly);
        run_extract(&args, temp_dir.path()).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("out.json")).unwrap();
        let files: Vec<FileComments> = serde_json::from_str(&output).unwrap();
        let comment = &files[0].comments[0];
        assert!(comment.tags.is_empty());
        assert_eq!(comment.lines, vec!["   A", " @x 1"]);
    }

    #[test]
    fn test_run_extract_text_output() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.js"), "// hello\n").unwrap();

        let mut args = args_with(vec![PathBuf::from("a.js")], "out.txt");
        args.format = OutputFormat::Text;
        run_extract(&args, temp_dir.path()).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("out.txt")).unwrap();
        assert_eq!(output, "a.js (1 comments)\n  L1-1\n    hello\n");
    }

    #[test]
    fn test_run_extract_reports_failures() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("good.js"), "// ok\n").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "text").unwrap();

        let args = args_with(
            vec![PathBuf::from("good.js"), PathBuf::from("notes.txt")],
            "out.json",
        );
        assert!(run_extract(&args, temp_dir.path()).is_err());

        // Good files are still written
        let output = fs::read_to_string(temp_dir.path().join("out.json")).unwrap();
        let files: Vec<FileComments> = serde_json::from_str(&output).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file, "good.js");
    }

    #[test]
    fn test_render_stdin_json_is_bare_array() {
        let factory = ParserFactory::new();
        let args = ExtractArgs {
            ext: "ts".to_string(),
            ..Default::default()
        };
        let rendered = render_stdin(
            "/** Typed. */\nlet x: number;\n",
            "ts",
            &factory,
            &ExtractOptions::default(),
            &args,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["lines"][0], "* Typed.");
        assert_eq!(value[0]["jsDoc"], false);

        assert!(render_stdin("", "rb", &factory, &ExtractOptions::default(), &args).is_err());
    }
}
