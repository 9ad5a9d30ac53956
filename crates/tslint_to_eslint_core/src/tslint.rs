//! TSLint configuration input.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{MigrateError, Severity, SourceRule};

const SCHEMA_JSON: &str = include_str!("../../../schemas/tslint.json");
static TSLINT_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// A parsed `tslint.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TslintConfig {
    /// Presets listed under `extends`, in file order.
    pub extends: Vec<String>,

    /// Severity for rules that do not set one.
    pub default_severity: Severity,

    /// Rules in file order; `jsRules` entries not already in `rules` follow.
    pub rules: Vec<SourceRule>,

    /// Glob patterns from `linterOptions.exclude`.
    pub exclude: Vec<String>,
}

impl TslintConfig {
    /// Default configuration file name.
    pub const CONFIG_FILE: &'static str = "tslint.json";

    /// Loads a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MigrateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MigrateError::file(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_jsonc(&content)
    }

    /// Parses configuration text; comments and trailing commas are allowed.
    pub fn from_jsonc(content: &str) -> Result<Self, MigrateError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| MigrateError::parse(format!("Invalid TSLint configuration: {}", e)))?
            .unwrap_or_else(|| Value::Object(Map::new()));

        let schema = TSLINT_SCHEMA.get_or_init(|| {
            let schema_json: Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded TSLint schema");
            Validator::new(&schema_json).expect("Invalid TSLint schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(MigrateError::config(format!(
                "TSLint configuration validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> Result<Self, MigrateError> {
        let default_severity = value
            .get("defaultSeverity")
            .and_then(Value::as_str)
            .and_then(Severity::parse)
            .unwrap_or_default();

        let extends = string_list(value.get("extends"));
        let exclude = string_list(
            value
                .get("linterOptions")
                .and_then(|options| options.get("exclude")),
        );

        let mut rules = Vec::new();
        if let Some(raw_rules) = value.get("rules").and_then(Value::as_object) {
            for (name, raw) in raw_rules {
                rules.push(SourceRule::from_raw(name, raw, default_severity)?);
            }
        }

        if let Some(js_rules) = value.get("jsRules").and_then(Value::as_object) {
            for (name, raw) in js_rules {
                if rules.iter().any(|rule| &rule.name == name) {
                    continue;
                }
                rules.push(SourceRule::from_raw(name, raw, default_severity)?);
            }
        }

        debug!(
            "Loaded TSLint configuration with {} rules and {} presets",
            rules.len(),
            extends.len()
        );

        Ok(Self {
            extends,
            default_severity,
            rules,
            exclude,
        })
    }
}

/// Reads a value that may be a single string or an array of strings.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(item)) => vec![item.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_jsonc_with_comments() {
        let config = TslintConfig::from_jsonc(
            r#"{
                // presets
                "extends": "tslint:recommended",
                "defaultSeverity": "warning",
                "rules": {
                    "no-var-keyword": true,
                    "quotemark": [true, "single"], /* trailing */
                    "no-console": { "severity": "error" },
                },
            }"#,
        )
        .unwrap();

        assert_eq!(config.extends, vec!["tslint:recommended"]);
        assert_eq!(config.default_severity, Severity::Warning);
        assert_eq!(
            config.rules,
            vec![
                SourceRule::new("no-var-keyword", Severity::Warning),
                SourceRule::new("quotemark", Severity::Warning)
                    .with_arguments(vec![json!("single")]),
                SourceRule::new("no-console", Severity::Error),
            ]
        );
    }

    #[test]
    fn test_rule_order_is_preserved() {
        let config = TslintConfig::from_jsonc(
            r#"{ "rules": { "zeta": true, "alpha": true, "mid": true } }"#,
        )
        .unwrap();
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_js_rules_do_not_override_rules() {
        let config = TslintConfig::from_jsonc(
            r#"{
                "rules": { "semicolon": [true, "always"] },
                "jsRules": { "semicolon": false, "no-eval": true }
            }"#,
        )
        .unwrap();
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].severity, Severity::Error);
        assert_eq!(config.rules[1].name, "no-eval");
    }

    #[test]
    fn test_empty_document() {
        let config = TslintConfig::from_jsonc("").unwrap();
        assert_eq!(config, TslintConfig::default());
    }

    #[rstest]
    #[case::rules_not_object(r#"{ "rules": [] }"#, "validation failed")]
    #[case::bad_severity(r#"{ "defaultSeverity": "fatal" }"#, "validation failed")]
    #[case::bad_rule_value(r#"{ "rules": { "quotemark": "single" } }"#, "validation failed")]
    #[case::syntax(r#"{ "rules": "#, "Invalid TSLint configuration")]
    fn test_invalid_config(#[case] content: &str, #[case] expected: &str) {
        let err = TslintConfig::from_jsonc(content).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{}' in '{}'",
            expected,
            err
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "linterOptions": {{ "exclude": ["**/*.d.ts"] }}, "rules": {{ "radix": true }} }}"#
        )
        .unwrap();

        let config = TslintConfig::from_file(file.path()).unwrap();
        assert_eq!(config.exclude, vec!["**/*.d.ts"]);
        assert_eq!(config.rules, vec![SourceRule::new("radix", Severity::Error)]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = TslintConfig::from_file("/nonexistent/tslint.json").unwrap_err();
        assert!(matches!(err, MigrateError::File(_)));
    }
}
