//! Report output module

mod json;
mod text;

use std::path::PathBuf;

use miette::Result;
use tslint_to_eslint_core::{ConfigConversion, EditorSettingsResults};

use crate::cli::ReportFormat;
use crate::packages::PackageManager;

/// Everything a run did, gathered for reporting.
pub struct MigrationReport {
    /// Where the ESLint configuration was (or would be) written.
    pub output_path: PathBuf,

    /// Formatted ESLint configuration.
    pub output: String,

    pub dry_run: bool,

    pub conversion: ConfigConversion,

    pub packages: Vec<String>,

    pub package_manager: PackageManager,

    pub editor: Option<EditorReport>,

    pub comments: Option<CommentsReport>,
}

pub struct EditorReport {
    pub path: PathBuf,
    pub results: EditorSettingsResults,
}

/// Totals over every file searched for comment directives.
#[derive(Debug, Default)]
pub struct CommentsReport {
    pub files_searched: usize,
    pub changed_files: Vec<PathBuf>,
    pub converted: usize,
    pub unchanged: usize,
    pub dropped_rules: Vec<String>,
}

impl MigrationReport {
    /// Returns whether a rule or editor setting failed to convert.
    pub fn has_errors(&self) -> bool {
        self.conversion.rules.has_failures()
            || self
                .editor
                .as_ref()
                .is_some_and(|editor| !editor.results.failed.is_empty())
    }
}

pub fn output_report(report: &MigrationReport, format: ReportFormat) -> Result<bool> {
    match format {
        ReportFormat::Json => json::output_json(report)?,
        ReportFormat::Text => text::output_text(report),
    }

    Ok(report.has_errors())
}
