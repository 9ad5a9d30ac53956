//! Naming rules, which all funnel into `@typescript-eslint/naming-convention`.

use serde_json::{Value, json};

use crate::converter::{
    ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry, ConverterResult,
};

const NAMING_CONVENTION: &str = "@typescript-eslint/naming-convention";

/// Identifiers TSLint's `ban-keywords` option refuses as variable names.
const BANNED_KEYWORDS: &[&str] = &[
    "any", "Number", "number", "String", "string", "Boolean", "boolean", "Undefined", "undefined",
];

pub(super) fn register(registry: &mut ConverterRegistry) {
    registry.insert("class-name", convert_class_name);
    registry.insert("interface-name", convert_interface_name);
    registry.insert("variable-name", convert_variable_name);
}

fn convert_class_name(_ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(ConverterOutput::rule(
        ConversionNotice::new(NAMING_CONVENTION)
            .with_argument(json!({ "selector": "class", "format": ["PascalCase"] })),
    ))
}

fn convert_interface_name(ctx: &ConverterContext<'_>) -> ConverterResult {
    let matches = match ctx.string_arguments().next() {
        None | Some("always-prefix") => true,
        Some("never-prefix") => false,
        Some(other) => return Err(format!("Unknown interface-name option \"{}\".", other)),
    };

    Ok(ConverterOutput::rule(
        ConversionNotice::new(NAMING_CONVENTION).with_argument(json!({
            "selector": "interface",
            "format": ["PascalCase"],
            "custom": { "regex": "^I[A-Z]", "match": matches }
        })),
    ))
}

/// Builds the `variable` selector from the case and underscore flags.
fn convert_variable_name(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut formats = vec!["camelCase", "UPPER_CASE"];
    if ctx.has_argument("allow-pascal-case") {
        formats.push("PascalCase");
    }
    if ctx.has_argument("allow-snake-case") {
        formats.push("snake_case");
    }

    let leading = underscore_policy(ctx, "allow-leading-underscore", "require-leading-underscore");
    let trailing =
        underscore_policy(ctx, "allow-trailing-underscore", "require-trailing-underscore");

    let mut rules = vec![
        ConversionNotice::new(NAMING_CONVENTION).with_argument(json!({
            "selector": "variable",
            "format": formats,
            "leadingUnderscore": leading,
            "trailingUnderscore": trailing
        })),
    ];

    if leading == "forbid" || trailing == "forbid" {
        rules.push(ConversionNotice::new("no-underscore-dangle"));
    }

    if ctx.has_argument("ban-keywords") {
        let names: Vec<Value> = BANNED_KEYWORDS.iter().map(|name| json!(name)).collect();
        rules.push(ConversionNotice::new("id-denylist").with_arguments(names));
    }

    if ctx.has_argument("check-format") {
        if let Some(naming) = rules.first_mut() {
            naming.notices.push(
                "ESLint always checks the identifier format; \"check-format\" is implied."
                    .to_string(),
            );
        }
    }

    Ok(ConverterOutput::rules(rules))
}

fn underscore_policy(ctx: &ConverterContext<'_>, allow: &str, require: &str) -> &'static str {
    if ctx.has_argument(require) {
        "require"
    } else if ctx.has_argument(allow) {
        "allow"
    } else {
        "forbid"
    }
}
