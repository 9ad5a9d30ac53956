//! Core ESLint rules that take options.

use serde_json::{Map, Value, json};

use super::unsupported_option;
use crate::Severity;
use crate::converter::{
    ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry, ConverterResult,
};

pub(super) fn register(registry: &mut ConverterRegistry) {
    registry.insert("ban", convert_ban);
    registry.insert("comment-format", convert_comment_format);
    registry.insert("curly", convert_curly);
    registry.insert("cyclomatic-complexity", convert_cyclomatic_complexity);
    registry.insert("import-blacklist", convert_import_blacklist);
    registry.insert("max-classes-per-file", convert_max_classes_per_file);
    registry.insert("max-file-line-count", convert_max_file_line_count);
    registry.insert("no-console", convert_no_console);
    registry.insert("no-empty", convert_no_empty);
    registry.insert("no-restricted-globals", convert_no_restricted_globals);
    registry.insert("object-literal-shorthand", convert_object_literal_shorthand);
    registry.insert("one-variable-per-declaration", convert_one_variable_per_declaration);
    registry.insert("prefer-const", convert_prefer_const);
    registry.insert("triple-equals", convert_triple_equals);
}

/// `ban` splits into banned globals and banned object methods.
fn convert_ban(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut globals = Vec::new();
    let mut properties = Vec::new();

    for argument in ctx.arguments {
        match argument {
            Value::String(name) => globals.push(json!(name)),
            Value::Array(parts) => match parts.as_slice() {
                [Value::String(name)] => globals.push(json!(name)),
                [Value::String(object), Value::String(method), rest @ ..] => {
                    let mut entry = Map::new();
                    entry.insert("object".to_string(), json!(object));
                    entry.insert("property".to_string(), json!(method));
                    if let Some(message) = rest.first() {
                        entry.insert("message".to_string(), message.clone());
                    }
                    properties.push(Value::Object(entry));
                }
                _ => return Err(format!("Unsupported ban entry {}.", argument)),
            },
            Value::Object(entry) => {
                let name = entry
                    .get("name")
                    .ok_or_else(|| format!("Ban entry {} is missing a name.", argument))?;
                let mut converted = Map::new();
                match name {
                    Value::String(name) => {
                        converted.insert("name".to_string(), json!(name));
                        if let Some(message) = entry.get("message") {
                            converted.insert("message".to_string(), message.clone());
                        }
                        globals.push(Value::Object(converted));
                    }
                    Value::Array(path) => {
                        let [Value::String(object), Value::String(property)] = path.as_slice()
                        else {
                            return Err(format!(
                                "Ban entry {} has an unsupported name path.",
                                argument
                            ));
                        };
                        converted.insert("object".to_string(), json!(object));
                        converted.insert("property".to_string(), json!(property));
                        if let Some(message) = entry.get("message") {
                            converted.insert("message".to_string(), message.clone());
                        }
                        properties.push(Value::Object(converted));
                    }
                    _ => return Err(format!("Unsupported ban entry {}.", argument)),
                }
            }
            _ => return Err(format!("Unsupported ban entry {}.", argument)),
        }
    }

    let mut rules = Vec::new();
    if !globals.is_empty() {
        rules.push(ConversionNotice::new("no-restricted-globals").with_arguments(globals));
    }
    if !properties.is_empty() {
        rules.push(ConversionNotice::new("no-restricted-properties").with_arguments(properties));
    }
    Ok(ConverterOutput::rules(rules))
}

fn convert_comment_format(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut rules = Vec::new();

    if ctx.has_argument("check-space") {
        rules.push(
            ConversionNotice::new("spaced-comment")
                .with_argument(json!("always"))
                .with_argument(json!({ "markers": ["/"] })),
        );
    }

    let lowercase = ctx.has_argument("check-lowercase");
    let uppercase = ctx.has_argument("check-uppercase");
    let capitalization = match (lowercase, uppercase) {
        (true, true) => {
            return Err(
                "\"check-lowercase\" and \"check-uppercase\" cannot both be set.".to_string(),
            );
        }
        (true, false) => Some("never"),
        (false, true) => Some("always"),
        (false, false) => None,
    };

    if let Some(mode) = capitalization {
        let mut notice = ConversionNotice::new("capitalized-comments").with_argument(json!(mode));
        let ignore_words = ctx
            .object_argument()
            .and_then(|options| options.get("ignore-words"))
            .and_then(Value::as_array);
        if let Some(words) = ignore_words {
            let pattern = words
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("|");
            notice = notice.with_argument(json!({ "ignorePattern": pattern }));
        }
        rules.push(notice);
    }

    Ok(ConverterOutput::rules(rules))
}

fn convert_curly(ctx: &ConverterContext<'_>) -> ConverterResult {
    let notice = ConversionNotice::new("curly");
    let notice = if ctx.has_argument("ignore-same-line") {
        notice.with_argument(json!("multi-line"))
    } else if ctx.has_argument("as-needed") {
        notice.with_argument(json!("multi"))
    } else {
        notice.with_argument(json!("all"))
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_cyclomatic_complexity(ctx: &ConverterContext<'_>) -> ConverterResult {
    let notice = ConversionNotice::new("complexity");
    let notice = match ctx.number_argument() {
        Some(threshold) => notice.with_argument(json!(threshold)),
        None => notice,
    };
    Ok(ConverterOutput::rule(notice))
}

/// Converted into a single `{ paths, patterns }` object.
fn convert_import_blacklist(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut paths = Vec::new();
    let mut patterns = Vec::new();

    for argument in ctx.arguments {
        match argument {
            Value::String(name) => paths.push(json!(name)),
            Value::Array(regexes) => {
                patterns.extend(regexes.iter().filter(|regex| regex.is_string()).cloned());
            }
            Value::Object(modules) => {
                for (name, imports) in modules {
                    paths.push(json!({ "name": name, "importNames": imports }));
                }
            }
            other => return Err(format!("Unsupported import-blacklist entry {}.", other)),
        }
    }

    let mut argument = Map::new();
    if !paths.is_empty() {
        argument.insert("paths".to_string(), Value::Array(paths));
    }
    let mut notice = ConversionNotice::new("no-restricted-imports");
    if !patterns.is_empty() {
        argument.insert("patterns".to_string(), Value::Array(patterns));
        notice = notice.with_notice(
            "ESLint matches restricted import patterns as gitignore-style globs, not regular expressions.",
        );
    }
    if !argument.is_empty() {
        notice = notice.with_argument(Value::Object(argument));
    }

    Ok(ConverterOutput::rule(notice))
}

fn convert_max_classes_per_file(ctx: &ConverterContext<'_>) -> ConverterResult {
    let Some(maximum) = ctx.number_argument() else {
        return Err("A maximum number of classes is required.".to_string());
    };
    let mut notice = ConversionNotice::new("max-classes-per-file").with_argument(json!(maximum));
    if ctx.has_argument("exclude-class-expressions") {
        notice = notice.with_notice(unsupported_option("exclude-class-expressions"));
    }
    Ok(ConverterOutput::rule(notice))
}

fn convert_max_file_line_count(ctx: &ConverterContext<'_>) -> ConverterResult {
    let notice = ConversionNotice::new("max-lines");
    let notice = match ctx.number_argument() {
        Some(maximum) => notice.with_argument(json!(maximum)),
        None => notice,
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_console(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("no-console");
    if !ctx.arguments.is_empty() {
        notice = notice.with_notice(
            "Custom console methods, if any, will no longer be allowed; ESLint bans every console method.",
        );
    }
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_empty(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut no_empty = ConversionNotice::new("no-empty");
    if ctx.has_argument("allow-empty-catch") {
        no_empty = no_empty.with_argument(json!({ "allowEmptyCatch": true }));
    }

    let mut empty_function = ConversionNotice::new("@typescript-eslint/no-empty-function");
    if ctx.has_argument("allow-empty-functions") {
        empty_function = empty_function.with_severity(Severity::Off);
    }

    Ok(ConverterOutput::rules(vec![no_empty, empty_function]))
}

fn convert_no_restricted_globals(ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(ConverterOutput::rule(
        ConversionNotice::new("no-restricted-globals").with_arguments(ctx.arguments.to_vec()),
    ))
}

fn convert_object_literal_shorthand(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mode = if ctx.has_argument("never") {
        "never"
    } else if let Some(options) = ctx.object_argument() {
        let never = |key: &str| options.get(key).and_then(Value::as_str) == Some("never");
        match (never("property"), never("method")) {
            (true, true) => "never",
            (true, false) => "methods",
            (false, true) => "properties",
            (false, false) => "always",
        }
    } else {
        "always"
    };
    Ok(ConverterOutput::rule(
        ConversionNotice::new("object-shorthand").with_argument(json!(mode)),
    ))
}

fn convert_one_variable_per_declaration(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("one-var").with_argument(json!("never"));
    if ctx.has_argument("ignore-for-loop") {
        notice = notice.with_notice(unsupported_option("ignore-for-loop"));
    }
    Ok(ConverterOutput::rule(notice))
}

fn convert_prefer_const(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("prefer-const");
    let destructuring = ctx
        .object_argument()
        .and_then(|options| options.get("destructuring"));
    if let Some(destructuring) = destructuring {
        notice = notice.with_argument(json!({ "destructuring": destructuring }));
    }
    Ok(ConverterOutput::rule(notice))
}

fn convert_triple_equals(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("eqeqeq").with_argument(json!("always"));
    if ctx.has_argument("allow-null-check") {
        notice = notice.with_argument(json!({ "null": "ignore" }));
    }
    if ctx.has_argument("allow-undefined-check") {
        notice = notice.with_notice(unsupported_option("allow-undefined-check"));
    }
    Ok(ConverterOutput::rule(notice))
}
