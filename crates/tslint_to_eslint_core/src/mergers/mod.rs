//! Built-in mergers for target rules that several TSLint rules feed.

use serde_json::{Map, Value};

use crate::Severity;
use crate::merger::{MergerRegistry, RuleMerger, escalate_severity};

/// Builds the registry of every built-in merger.
pub fn builtin_mergers() -> MergerRegistry {
    let mut registry = MergerRegistry::new();

    registry.insert("@typescript-eslint/ban-types", merge_ban_types);
    registry.insert(
        "@typescript-eslint/consistent-type-assertions",
        merge_consistent_type_assertions,
    );
    registry.insert("@typescript-eslint/naming-convention", merge_unique_arguments);
    registry.insert("@typescript-eslint/no-empty-function", DisableWins);
    registry.insert("id-denylist", merge_unique_arguments);
    registry.insert("no-restricted-globals", merge_unique_arguments);
    registry.insert("no-restricted-imports", merge_restricted_imports);
    registry.insert("no-restricted-properties", merge_unique_arguments);

    registry
}

/// Concatenates every argument list, dropping exact duplicates.
fn merge_unique_arguments(proposals: &[Vec<Value>]) -> Result<Vec<Value>, String> {
    let mut merged: Vec<Value> = Vec::new();
    for argument in proposals.iter().flatten() {
        if !merged.contains(argument) {
            merged.push(argument.clone());
        }
    }
    Ok(merged)
}

/// Unions the `types` maps; later messages override earlier ones.
fn merge_ban_types(proposals: &[Vec<Value>]) -> Result<Vec<Value>, String> {
    let mut types = Map::new();
    let mut seen = false;
    for options in proposals.iter().filter_map(|arguments| arguments.first()) {
        let Some(banned) = options.get("types").and_then(Value::as_object) else {
            return Err(format!("Expected a types map, got {}.", options));
        };
        seen = true;
        for (name, setting) in banned {
            types.insert(name.clone(), setting.clone());
        }
    }

    if !seen {
        return Ok(Vec::new());
    }
    let mut options = Map::new();
    options.insert("types".to_string(), Value::Object(types));
    Ok(vec![Value::Object(options)])
}

/// Keeps one assertion style and the strictest object-literal policy.
fn merge_consistent_type_assertions(proposals: &[Vec<Value>]) -> Result<Vec<Value>, String> {
    let mut assertion_style: Option<&str> = None;
    let mut literal_policy: Option<&str> = None;

    for options in proposals.iter().filter_map(|arguments| arguments.first()) {
        if let Some(style) = options.get("assertionStyle").and_then(Value::as_str) {
            match assertion_style {
                Some(existing) if existing != style => {
                    return Err(format!(
                        "Assertion style \"{}\" conflicts with \"{}\".",
                        style, existing
                    ));
                }
                _ => assertion_style = Some(style),
            }
        }
        if let Some(policy) = options
            .get("objectLiteralTypeAssertions")
            .and_then(Value::as_str)
        {
            literal_policy = Some(match literal_policy {
                Some(existing) if strictness(existing) >= strictness(policy) => existing,
                _ => policy,
            });
        }
    }

    let mut options = Map::new();
    if let Some(style) = assertion_style {
        options.insert("assertionStyle".to_string(), Value::from(style));
    }
    if let Some(policy) = literal_policy {
        options.insert("objectLiteralTypeAssertions".to_string(), Value::from(policy));
    }
    if options.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![Value::Object(options)])
}

fn strictness(policy: &str) -> u8 {
    match policy {
        "never" => 2,
        "allow-as-parameter" => 1,
        _ => 0,
    }
}

/// Unions `paths` and `patterns`, keeping first-seen order.
fn merge_restricted_imports(proposals: &[Vec<Value>]) -> Result<Vec<Value>, String> {
    let mut paths: Vec<Value> = Vec::new();
    let mut patterns: Vec<Value> = Vec::new();

    for argument in proposals.iter().flatten() {
        match argument {
            Value::String(_) => push_unique(&mut paths, argument),
            Value::Object(options) => {
                for path in options.get("paths").and_then(Value::as_array).into_iter().flatten() {
                    push_unique(&mut paths, path);
                }
                for pattern in options
                    .get("patterns")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                {
                    push_unique(&mut patterns, pattern);
                }
            }
            other => return Err(format!("Unsupported restricted import {}.", other)),
        }
    }

    let mut options = Map::new();
    if !paths.is_empty() {
        options.insert("paths".to_string(), Value::Array(paths));
    }
    if !patterns.is_empty() {
        options.insert("patterns".to_string(), Value::Array(patterns));
    }
    if options.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![Value::Object(options)])
}

fn push_unique(values: &mut Vec<Value>, value: &Value) {
    if !values.contains(value) {
        values.push(value.clone());
    }
}

/// A rule explicitly disabled by one source rule stays disabled.
///
/// `no-empty` with `allow-empty-functions` turns
/// `@typescript-eslint/no-empty-function` off; other source rules that enable
/// it must not switch it back on.
struct DisableWins;

impl RuleMerger for DisableWins {
    fn merge_arguments(&self, proposals: &[Vec<Value>]) -> Result<Vec<Value>, String> {
        Ok(proposals.last().cloned().unwrap_or_default())
    }

    fn merge_severity(&self, severities: &[Severity]) -> Severity {
        if severities.contains(&Severity::Off) {
            Severity::Off
        } else {
            escalate_severity(severities)
        }
    }
}
