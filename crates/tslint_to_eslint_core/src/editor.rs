//! VS Code editor settings conversion.
//!
//! Only the settings of the TSLint extension are looked at; everything else in
//! the settings file is passed through untouched.

use std::collections::HashMap;
use std::fmt;

use jsonc_parser::ParseOptions;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::{ConversionError, ConversionSettings, MigrateError};

/// Settings keys of the TSLint extension that are considered for conversion.
pub const KNOWN_EDITOR_SETTINGS: &[&str] = &[
    "tslint.configFile",
    "tslint.jsEnable",
    "tslint.ignoreDefinitionFiles",
    "tslint.exclude",
    "tslint.alwaysShowRuleFailuresAsWarnings",
    "tslint.suppressWhileTypeErrorsPresent",
];

/// One converted editor setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSetting {
    /// Settings key, e.g. `eslint.options`.
    pub name: String,

    /// Settings value.
    pub value: Value,
}

impl EditorSetting {
    /// Creates a setting.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Result of one editor setting converter.
pub type EditorSettingResult = Result<Vec<EditorSetting>, String>;

type EditorSettingFn =
    Box<dyn Fn(&Value, &ConversionSettings) -> EditorSettingResult + Send + Sync>;

/// Mapping from TSLint extension setting to its converter.
#[derive(Default)]
pub struct EditorSettingRegistry {
    converters: HashMap<String, EditorSettingFn>,
}

impl EditorSettingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a converter, builder style.
    pub fn with<F>(mut self, setting_name: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&Value, &ConversionSettings) -> EditorSettingResult + Send + Sync + 'static,
    {
        self.converters
            .insert(setting_name.into(), Box::new(converter));
        self
    }

    /// Returns whether a converter exists for `setting_name`.
    pub fn contains(&self, setting_name: &str) -> bool {
        self.converters.contains_key(setting_name)
    }
}

impl fmt::Debug for EditorSettingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.converters.keys().collect();
        names.sort_unstable();
        f.debug_struct("EditorSettingRegistry")
            .field("settings", &names)
            .finish()
    }
}

/// Converters for the TSLint extension settings that have an ESLint
/// extension counterpart.
pub fn builtin_editor_converters() -> EditorSettingRegistry {
    EditorSettingRegistry::new()
        .with("tslint.configFile", convert_config_file)
        .with("tslint.jsEnable", convert_js_enable)
        .with("tslint.ignoreDefinitionFiles", convert_ignore_definition_files)
        .with("tslint.exclude", convert_exclude)
        .with(
            "tslint.alwaysShowRuleFailuresAsWarnings",
            convert_always_show_rule_failures_as_warnings,
        )
}

fn convert_config_file(value: &Value, _settings: &ConversionSettings) -> EditorSettingResult {
    let Some(path) = value.as_str() else {
        return Err(format!("Expected a file path, got {}.", value));
    };
    Ok(vec![EditorSetting::new(
        "eslint.options",
        json!({ "overrideConfigFile": path }),
    )])
}

fn convert_js_enable(value: &Value, _settings: &ConversionSettings) -> EditorSettingResult {
    let Some(enabled) = value.as_bool() else {
        return Err(format!("Expected a boolean, got {}.", value));
    };
    let languages = if enabled {
        json!(["javascript", "javascriptreact", "typescript", "typescriptreact"])
    } else {
        json!(["typescript", "typescriptreact"])
    };
    Ok(vec![EditorSetting::new("eslint.validate", languages)])
}

fn convert_ignore_definition_files(
    value: &Value,
    _settings: &ConversionSettings,
) -> EditorSettingResult {
    match value.as_bool() {
        Some(true) => Ok(vec![EditorSetting::new(
            "eslint.options",
            json!({ "ignorePattern": "*.d.ts" }),
        )]),
        Some(false) => Ok(Vec::new()),
        None => Err(format!("Expected a boolean, got {}.", value)),
    }
}

fn convert_exclude(value: &Value, _settings: &ConversionSettings) -> EditorSettingResult {
    let patterns: Vec<&str> = match value {
        Value::String(pattern) => vec![pattern.as_str()],
        Value::Array(patterns) => patterns.iter().filter_map(Value::as_str).collect(),
        other => return Err(format!("Expected glob patterns, got {}.", other)),
    };
    Ok(vec![EditorSetting::new(
        "eslint.options",
        json!({ "ignorePattern": patterns }),
    )])
}

fn convert_always_show_rule_failures_as_warnings(
    value: &Value,
    _settings: &ConversionSettings,
) -> EditorSettingResult {
    match value.as_bool() {
        Some(true) => Ok(vec![EditorSetting::new(
            "eslint.rules.customizations",
            json!([{ "rule": "*", "severity": "warn" }]),
        )]),
        Some(false) => Ok(Vec::new()),
        None => Err(format!("Expected a boolean, got {}.", value)),
    }
}

/// Aggregate output of converting an editor settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettingsResults {
    /// Converted settings in first-seen order.
    pub converted: Map<String, Value>,

    /// Settings whose converter rejected the value.
    pub failed: Vec<ConversionError>,

    /// Known TSLint settings without an ESLint counterpart.
    pub missing: Vec<String>,
}

/// Parses a settings file that may contain comments.
pub fn parse_editor_settings(content: &str) -> Result<Map<String, Value>, MigrateError> {
    let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| MigrateError::parse(format!("Invalid editor settings: {}", e)))?;
    match value {
        None => Ok(Map::new()),
        Some(Value::Object(settings)) => Ok(settings),
        Some(_) => Err(MigrateError::config("Editor settings root must be an object")),
    }
}

/// Converts the TSLint extension settings found in `editor_settings`.
///
/// Object values written to the same key by several converters are merged
/// shallowly, except `ignorePattern` globs which are concatenated. Any other
/// value is replaced by the later converter.
pub fn convert_editor_settings(
    converters: &EditorSettingRegistry,
    editor_settings: &Map<String, Value>,
    settings: &ConversionSettings,
) -> EditorSettingsResults {
    let mut results = EditorSettingsResults::default();

    for (name, value) in editor_settings {
        if !KNOWN_EDITOR_SETTINGS.contains(&name.as_str()) {
            continue;
        }

        let Some(converter) = converters.converters.get(name) else {
            debug!("No converter for editor setting '{}'", name);
            results.missing.push(name.clone());
            continue;
        };

        match converter(value, settings) {
            Ok(converted) => {
                for setting in converted {
                    merge_setting(&mut results.converted, setting);
                }
            }
            Err(message) => results
                .failed
                .push(ConversionError::converter_failed(name, message)),
        }
    }

    results
}

fn merge_setting(converted: &mut Map<String, Value>, setting: EditorSetting) {
    let EditorSetting { name, value } = setting;
    if let (Some(Value::Object(existing)), Value::Object(additions)) =
        (converted.get_mut(&name), &value)
    {
        for (key, addition) in additions {
            if key == "ignorePattern" {
                if let Some(previous) = existing.get_mut(key) {
                    *previous = join_patterns(previous.take(), addition.clone());
                    continue;
                }
            }
            existing.insert(key.clone(), addition.clone());
        }
        return;
    }
    converted.insert(name, value);
}

/// Concatenates two `ignorePattern` values, which may each be a single glob
/// or a list of globs.
fn join_patterns(previous: Value, addition: Value) -> Value {
    let mut patterns: Vec<Value> = Vec::new();
    for value in [previous, addition] {
        let values = match value {
            Value::Array(values) => values,
            single => vec![single],
        };
        for pattern in values {
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
    }
    Value::Array(patterns)
}

/// The original settings with the converted keys added or replaced.
pub fn apply_editor_settings(
    editor_settings: &Map<String, Value>,
    results: &EditorSettingsResults,
) -> Value {
    let mut output = editor_settings.clone();
    for (name, value) in &results.converted {
        output.insert(name.clone(), value.clone());
    }
    Value::Object(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings_from(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_unknown_settings_are_ignored() {
        let editor = settings_from(json!({
            "editor.tabSize": 4,
            "tslint.enable": true,
            "tslint.jsEnable": true
        }));
        let results = convert_editor_settings(
            &builtin_editor_converters(),
            &editor,
            &ConversionSettings::new(),
        );

        assert_eq!(
            results.converted,
            settings_from(json!({
                "eslint.validate": [
                    "javascript",
                    "javascriptreact",
                    "typescript",
                    "typescriptreact"
                ]
            }))
        );
        assert!(results.missing.is_empty());
        assert!(results.failed.is_empty());
    }

    #[test]
    fn test_object_values_are_merged() {
        let editor = settings_from(json!({
            "tslint.configFile": "tslint.custom.json",
            "tslint.exclude": ["dist/**"]
        }));
        let results = convert_editor_settings(
            &builtin_editor_converters(),
            &editor,
            &ConversionSettings::new(),
        );

        assert_eq!(
            results.converted.get("eslint.options"),
            Some(&json!({
                "overrideConfigFile": "tslint.custom.json",
                "ignorePattern": ["dist/**"]
            }))
        );
    }

    #[test]
    fn test_ignore_patterns_are_concatenated() {
        let editor = settings_from(json!({
            "tslint.ignoreDefinitionFiles": true,
            "tslint.exclude": ["dist/**", "*.d.ts"]
        }));
        let results = convert_editor_settings(
            &builtin_editor_converters(),
            &editor,
            &ConversionSettings::new(),
        );

        assert_eq!(
            results.converted.get("eslint.options"),
            Some(&json!({ "ignorePattern": ["*.d.ts", "dist/**"] }))
        );
    }

    #[test]
    fn test_missing_and_failed() {
        let editor = settings_from(json!({
            "tslint.suppressWhileTypeErrorsPresent": true,
            "tslint.jsEnable": "yes"
        }));
        let results = convert_editor_settings(
            &builtin_editor_converters(),
            &editor,
            &ConversionSettings::new(),
        );

        assert_eq!(results.missing, vec!["tslint.suppressWhileTypeErrorsPresent"]);
        assert_eq!(results.failed.len(), 1);
        assert_eq!(results.failed[0].rule_name(), "tslint.jsEnable");
    }

    #[test]
    fn test_apply_keeps_original_settings() {
        let editor = settings_from(json!({
            "editor.tabSize": 2,
            "tslint.alwaysShowRuleFailuresAsWarnings": true
        }));
        let results = convert_editor_settings(
            &builtin_editor_converters(),
            &editor,
            &ConversionSettings::new(),
        );

        assert_eq!(
            apply_editor_settings(&editor, &results),
            json!({
                "editor.tabSize": 2,
                "tslint.alwaysShowRuleFailuresAsWarnings": true,
                "eslint.rules.customizations": [{ "rule": "*", "severity": "warn" }]
            })
        );
    }

    #[test]
    fn test_parse_editor_settings_with_comments() {
        let settings =
            parse_editor_settings("{\n  // editor\n  \"tslint.jsEnable\": false,\n}").unwrap();
        assert_eq!(settings.get("tslint.jsEnable"), Some(&json!(false)));
        assert!(parse_editor_settings("[]").is_err());
    }
}
