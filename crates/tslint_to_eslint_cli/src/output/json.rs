//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use super::MigrationReport;

pub fn output_json(report: &MigrationReport) -> Result<()> {
    let results = &report.conversion.rules;

    let editor = report.editor.as_ref().map(|editor| {
        serde_json::json!({
            "path": editor.path.display().to_string(),
            "results": editor.results,
        })
    });

    let comments = report.comments.as_ref().map(|comments| {
        let changed: Vec<_> = comments
            .changed_files
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        serde_json::json!({
            "filesSearched": comments.files_searched,
            "changedFiles": changed,
            "converted": comments.converted,
            "unchanged": comments.unchanged,
            "droppedRules": comments.dropped_rules,
        })
    });

    let output = serde_json::json!({
        "outputPath": report.output_path.display().to_string(),
        "dryRun": report.dry_run,
        "convertedRuleCount": results.converted_rule_count(),
        "results": results,
        "missingExtends": report.conversion.missing_extends,
        "packages": report.packages,
        "installCommand": report.package_manager.install_command(&report.packages),
        "editor": editor,
        "comments": comments,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
