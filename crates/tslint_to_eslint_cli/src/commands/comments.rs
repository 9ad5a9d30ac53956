//! Comment directive rewriting across source files

use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use tracing::{debug, warn};
use tslint_to_eslint_core::{
    CommentConversion, ConversionSettings, ConverterRegistry, convert_comments,
};

use crate::file_finder::{DEFAULT_SOURCE_PATTERNS, FileFinder};
use crate::output::CommentsReport;
use crate::utils::write_file;

type FileConversion = std::result::Result<(PathBuf, CommentConversion), (PathBuf, std::io::Error)>;

/// Rewrites `tslint:` directives in every file matching `patterns`.
///
/// An empty pattern list searches the default TypeScript and JavaScript
/// sources. Files are converted in parallel and written afterwards.
pub fn run_comments(
    patterns: &[String],
    exclude: &[String],
    base_dir: &Path,
    converters: &ConverterRegistry,
    settings: &ConversionSettings,
    dry_run: bool,
) -> Result<CommentsReport> {
    let patterns: Vec<String> = if patterns.is_empty() {
        DEFAULT_SOURCE_PATTERNS.iter().map(|p| p.to_string()).collect()
    } else {
        patterns.to_vec()
    };

    let finder = FileFinder::new(exclude).into_diagnostic()?;
    let files = finder.discover_files(&patterns, base_dir).into_diagnostic()?;

    let results: Vec<FileConversion> = files
        .par_iter()
        .map(|path| -> FileConversion {
            let content = fs::read_to_string(path).map_err(|e| (path.clone(), e))?;
            Ok((path.clone(), convert_comments(&content, converters, settings)))
        })
        .collect();

    let mut report = CommentsReport {
        files_searched: files.len(),
        ..CommentsReport::default()
    };

    for result in results {
        let (path, conversion) = match result {
            Ok(converted) => converted,
            Err((path, error)) => {
                warn!("Failed to read {}: {}", path.display(), error);
                continue;
            }
        };

        report.converted += conversion.converted;
        report.unchanged += conversion.unchanged;
        for rule in &conversion.dropped_rules {
            if !report.dropped_rules.contains(rule) {
                report.dropped_rules.push(rule.clone());
            }
        }

        if !conversion.is_changed() {
            continue;
        }

        debug!(
            "Rewrote {} directives in {}",
            conversion.converted,
            path.display()
        );
        if !dry_run {
            write_file(&path, &conversion.content)?;
        }
        report.changed_files.push(path);
    }

    Ok(report)
}
