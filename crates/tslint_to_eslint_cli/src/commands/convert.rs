//! Convert command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use tracing::{debug, info, warn};
use tslint_to_eslint_core::{
    ConfigConversion, ConversionSettings, ConvertRulesDependencies, ConverterRegistry,
    EslintConfig, OutputFormat, TslintConfig, builtin_mergers, convert_config, format_output,
    summarize_config,
};

use crate::cli::Cli;
use crate::utils::write_file;

/// The converted ESLint configuration, ready to report.
pub struct ConvertedConfig {
    pub conversion: ConfigConversion,
    pub eslint_config: Value,
    pub output: String,

    /// `linterOptions.exclude` of the TSLint configuration.
    pub exclude: Vec<String>,
}

pub fn run_convert(
    cli: &Cli,
    converters: &ConverterRegistry,
    settings: &ConversionSettings,
) -> Result<ConvertedConfig> {
    info!("Converting {}", cli.tslint.display());
    let tslint = TslintConfig::from_file(&cli.tslint).into_diagnostic()?;
    debug!("Loaded {} TSLint rules", tslint.rules.len());

    let existing = match existing_eslint_path(cli) {
        Some(path) => {
            debug!("Using existing ESLint configuration {}", path.display());
            Some(EslintConfig::from_file(&path).into_diagnostic()?)
        }
        None => None,
    };

    let mergers = builtin_mergers();
    let dependencies = ConvertRulesDependencies {
        converters,
        mergers: &mergers,
    };

    let conversion = convert_config(&dependencies, &tslint, existing.as_ref(), settings);
    let eslint_config = summarize_config(&conversion, existing.as_ref(), settings);
    let output =
        format_output(&eslint_config, OutputFormat::from_path(&cli.config)).into_diagnostic()?;

    if cli.dry_run {
        info!("Dry run: not writing {}", cli.config.display());
    } else {
        write_file(&cli.config, &output)?;
    }

    Ok(ConvertedConfig {
        conversion,
        eslint_config,
        output,
        exclude: tslint.exclude,
    })
}

/// Existing ESLint configuration to build on.
///
/// `--eslint` wins; otherwise the output file is used when it exists and is
/// not a JavaScript module.
fn existing_eslint_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.eslint {
        return Some(path.clone());
    }

    if !cli.config.is_file() {
        return None;
    }

    if is_javascript(&cli.config) {
        warn!(
            "Not reading existing {}: JavaScript configurations can't be loaded, pass a JSON or YAML file with --eslint",
            cli.config.display()
        );
        return None;
    }

    Some(cli.config.clone())
}

fn is_javascript(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("js" | "cjs" | "mjs")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["tslint-to-eslint-config"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_existing_path_prefers_flag() {
        let cli = cli(&["--eslint", "base.json", "--config", "out.json"]);
        assert_eq!(existing_eslint_path(&cli), Some(PathBuf::from("base.json")));
    }

    #[test]
    fn test_existing_path_uses_output_when_present() {
        let dir = tempdir().unwrap();
        let output = dir.path().join(".eslintrc.json");
        fs::write(&output, "{}").unwrap();

        let cli = cli(&["--config", output.to_str().unwrap()]);
        assert_eq!(existing_eslint_path(&cli), Some(output));
    }

    #[test]
    fn test_existing_path_skips_javascript() {
        let dir = tempdir().unwrap();
        let output = dir.path().join(".eslintrc.js");
        fs::write(&output, "module.exports = {};").unwrap();

        let cli = cli(&["--config", output.to_str().unwrap()]);
        assert_eq!(existing_eslint_path(&cli), None);
    }

    #[test]
    fn test_existing_path_absent() {
        let cli = cli(&["--config", "/nonexistent/.eslintrc.json"]);
        assert_eq!(existing_eslint_path(&cli), None);
    }
}
