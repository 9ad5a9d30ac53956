//! Editor settings conversion

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;
use tslint_to_eslint_core::{
    ConversionSettings, OutputFormat, apply_editor_settings, builtin_editor_converters,
    convert_editor_settings, format_output, parse_editor_settings,
};

use crate::output::EditorReport;
use crate::utils::write_file;

/// Converts the TSLint settings of a VS Code settings file in place.
pub fn run_editor(
    path: &Path,
    settings: &ConversionSettings,
    dry_run: bool,
) -> Result<EditorReport> {
    info!("Converting editor settings {}", path.display());
    let content = fs::read_to_string(path).into_diagnostic()?;
    let editor_settings = parse_editor_settings(&content).into_diagnostic()?;

    let converters = builtin_editor_converters();
    let results = convert_editor_settings(&converters, &editor_settings, settings);

    if !dry_run {
        let updated = apply_editor_settings(&editor_settings, &results);
        let output = format_output(&updated, OutputFormat::Json).into_diagnostic()?;
        write_file(path, &output)?;
    }

    Ok(EditorReport {
        path: path.to_path_buf(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_run_editor_rewrites_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                // TSLint extension
                "editor.tabSize": 2,
                "tslint.jsEnable": true,
            }"#,
        )
        .unwrap();

        let report = run_editor(&path, &ConversionSettings::new(), false).unwrap();
        assert!(report.results.failed.is_empty());

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["editor.tabSize"], 2);
        assert!(written.get("eslint.validate").is_some());
    }

    #[test]
    fn test_run_editor_dry_run_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let original = r#"{ "tslint.jsEnable": true }"#;
        fs::write(&path, original).unwrap();

        let report = run_editor(&path, &ConversionSettings::new(), true).unwrap();
        assert_eq!(report.results.converted.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
