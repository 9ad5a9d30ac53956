//! Builds the final ESLint configuration object.

use serde_json::{Map, Value, json};

use crate::migration::ConfigConversion;
use crate::results::OrderedSet;
use crate::{ConversionSettings, EslintConfig, Severity};

/// Parser every generated configuration uses.
pub const TYPESCRIPT_PARSER: &str = "@typescript-eslint/parser";

/// Plugin that runs TSLint rules without an ESLint equivalent.
pub const TSLINT_PLUGIN: &str = "@typescript-eslint/tslint";

/// Rule name under which unconverted TSLint rules keep running.
pub const TSLINT_CONFIG_RULE: &str = "@typescript-eslint/tslint/config";

/// Produces the ESLint configuration for a conversion.
///
/// Key order is stable: `env`, `extends`, `globals`, `parser`,
/// `parserOptions`, `plugins`, `rules`. Empty `extends`, `globals` and
/// `rules` are left out.
pub fn summarize_config(
    conversion: &ConfigConversion,
    eslint: Option<&EslintConfig>,
    settings: &ConversionSettings,
) -> Value {
    let results = &conversion.rules;
    let mut config = Map::new();

    config.insert(
        "env".to_string(),
        json!({ "browser": true, "es6": true, "node": true }),
    );

    let mut extends = OrderedSet::new();
    if let Some(eslint) = eslint {
        extends.extend(eslint.extends.iter().cloned());
    }
    extends.extend(results.extends.iter());
    if settings.prettier {
        extends.insert("prettier");
    }
    if !extends.is_empty() {
        config.insert("extends".to_string(), json!(extends));
    }

    if let Some(globals) = eslint.and_then(|eslint| eslint.globals.as_ref()) {
        config.insert("globals".to_string(), globals.clone());
    }

    config.insert("parser".to_string(), json!(TYPESCRIPT_PARSER));
    config.insert(
        "parserOptions".to_string(),
        json!({ "project": "tsconfig.json", "sourceType": "module" }),
    );

    let missing_rules = tslint_config_rules(conversion);

    let mut plugins = OrderedSet::new();
    if let Some(eslint) = eslint {
        plugins.extend(eslint.plugins.iter().cloned());
    }
    plugins.extend(results.plugins.iter());
    plugins.insert("@typescript-eslint");
    if !missing_rules.is_empty() {
        plugins.insert(TSLINT_PLUGIN);
    }
    config.insert("plugins".to_string(), json!(plugins));

    let mut rules = Map::new();
    if let Some(eslint) = eslint {
        for (name, value) in &eslint.rules {
            rules.insert(name.clone(), value.clone());
        }
    }
    for (name, settings) in results.converted.iter() {
        rules.insert(name.to_string(), settings.to_eslint_value());
    }
    if !missing_rules.is_empty() {
        rules.insert(
            TSLINT_CONFIG_RULE.to_string(),
            json!([Severity::Error.as_eslint_str(), { "rules": missing_rules }]),
        );
    }
    if !rules.is_empty() {
        config.insert("rules".to_string(), Value::Object(rules));
    }

    Value::Object(config)
}

/// Missing rules that are enabled, keyed by TSLint name.
fn tslint_config_rules(conversion: &ConfigConversion) -> Map<String, Value> {
    conversion
        .rules
        .missing
        .iter()
        .filter(|rule| rule.severity != Severity::Off)
        .map(|rule| {
            let value = if rule.arguments.is_empty() {
                Value::Bool(true)
            } else {
                Value::Array(rule.arguments.clone())
            };
            (rule.name.clone(), value)
        })
        .collect()
}
