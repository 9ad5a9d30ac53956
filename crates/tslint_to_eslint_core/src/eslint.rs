//! Existing ESLint configuration input.

use std::fs;
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde_json::{Map, Value};

use crate::MigrateError;
use crate::tslint::string_list;

/// The parts of a pre-existing ESLint configuration the migration keeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EslintConfig {
    /// Presets the user already extends.
    pub extends: Vec<String>,

    /// Plugins the user already loads.
    pub plugins: Vec<String>,

    /// Raw `globals` object, copied through untouched.
    pub globals: Option<Value>,

    /// Raw `rules` object; these rules win over converted ones.
    pub rules: Map<String, Value>,
}

impl EslintConfig {
    /// Loads a JSON, JSONC or YAML configuration file.
    ///
    /// JavaScript configurations cannot be evaluated and are rejected.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MigrateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MigrateError::file(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Self::from_yaml(&content),
            Some("js" | "cjs" | "mjs") => Err(MigrateError::config(format!(
                "Cannot read JavaScript ESLint configuration {}; convert it to JSON or YAML first",
                path.display()
            ))),
            _ => Self::from_jsonc(&content),
        }
    }

    /// Parses JSON with comments.
    pub fn from_jsonc(content: &str) -> Result<Self, MigrateError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| MigrateError::parse(format!("Invalid ESLint configuration: {}", e)))?
            .unwrap_or_else(|| Value::Object(Map::new()));
        Self::from_value(value)
    }

    /// Parses YAML.
    pub fn from_yaml(content: &str) -> Result<Self, MigrateError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| MigrateError::parse(format!("Invalid ESLint configuration: {}", e)))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, MigrateError> {
        let Value::Object(mut root) = value else {
            return Err(MigrateError::config(
                "ESLint configuration root must be an object",
            ));
        };

        let rules = match root.remove("rules") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(rules)) => rules,
            Some(other) => {
                return Err(MigrateError::config(format!(
                    "ESLint 'rules' must be an object, got {}",
                    other
                )));
            }
        };

        Ok(Self {
            extends: string_list(root.get("extends")),
            plugins: string_list(root.get("plugins")),
            globals: root.remove("globals").filter(|globals| !globals.is_null()),
            rules,
        })
    }
}
