//! Rules whose ESLint equivalent lives in a third-party plugin.

use serde_json::{Map, Value, json};

use super::unsupported_option;
use crate::converter::{
    ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry, ConverterResult,
};

const IMPORT_PLUGIN: &str = "eslint-plugin-import";
const JSDOC_PLUGIN: &str = "eslint-plugin-jsdoc";
const REACT_PLUGIN: &str = "eslint-plugin-react";

/// `tslint-react` rules that map onto an option-less `eslint-plugin-react` rule.
const REACT_RULES: &[(&str, &str)] = &[
    ("jsx-key", "react/jsx-key"),
    ("jsx-no-bind", "react/jsx-no-bind"),
    ("jsx-no-lambda", "react/jsx-no-bind"),
    ("jsx-no-string-ref", "react/no-string-refs"),
    ("jsx-self-close", "react/self-closing-comp"),
];

pub(super) fn register(registry: &mut ConverterRegistry) {
    registry.insert("deprecation", convert_deprecation);
    registry.insert("file-name-casing", convert_file_name_casing);
    registry.insert("jsdoc-format", convert_jsdoc_format);
    registry.insert("jsx-boolean-value", convert_jsx_boolean_value);
    registry.insert("jsx-curly-spacing", convert_jsx_curly_spacing);
    registry.insert("no-default-export", convert_no_default_export);
    registry.insert("no-duplicate-imports", convert_no_duplicate_imports);
    registry.insert("no-implicit-dependencies", convert_no_implicit_dependencies);
    registry.insert("no-null-keyword", convert_no_null_keyword);
    registry.insert("no-redundant-jsdoc", convert_no_redundant_jsdoc);
    registry.insert("no-submodule-imports", convert_no_submodule_imports);
    registry.insert("only-arrow-functions", convert_only_arrow_functions);
    registry.insert("ordered-imports", convert_ordered_imports);
    registry.insert("prettier", convert_prettier);

    for &(tslint_rule, eslint_rule) in REACT_RULES {
        registry.insert(tslint_rule, move |_: &ConverterContext<'_>| {
            Ok(ConverterOutput::rule(ConversionNotice::new(eslint_rule)).with_plugin(REACT_PLUGIN))
        });
    }
}

fn convert_deprecation(_ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(
        ConverterOutput::rule(ConversionNotice::new("deprecation/deprecation"))
            .with_plugin("eslint-plugin-deprecation"),
    )
}

fn convert_file_name_casing(ctx: &ConverterContext<'_>) -> ConverterResult {
    let case = match ctx.string_arguments().next() {
        None | Some("camel-case") => "camelCase",
        Some("pascal-case") => "pascalCase",
        Some("kebab-case") => "kebabCase",
        Some("snake-case") => "snakeCase",
        Some(other) => return Err(format!("Unsupported file name casing \"{}\".", other)),
    };
    Ok(ConverterOutput::rule(
        ConversionNotice::new("unicorn/filename-case").with_argument(json!({ "case": case })),
    )
    .with_plugin("eslint-plugin-unicorn"))
}

fn convert_jsdoc_format(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut rules = vec![
        ConversionNotice::new("jsdoc/check-alignment"),
        ConversionNotice::new("jsdoc/newline-after-description"),
    ];
    if ctx.has_argument("check-multiline-start") {
        rules.push(ConversionNotice::new("jsdoc/no-bad-blocks"));
    }
    Ok(ConverterOutput::rules(rules).with_plugin(JSDOC_PLUGIN))
}

fn convert_jsx_boolean_value(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mode = match ctx.string_arguments().next() {
        None | Some("always") => "always",
        Some("never") => "never",
        Some(other) => return Err(format!("Unknown jsx-boolean-value mode \"{}\".", other)),
    };
    Ok(ConverterOutput::rule(
        ConversionNotice::new("react/jsx-boolean-value").with_argument(json!(mode)),
    )
    .with_plugin(REACT_PLUGIN))
}

fn convert_jsx_curly_spacing(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mode = match ctx.string_arguments().next() {
        Some("always") => "always",
        None | Some("never") => "never",
        Some(other) => return Err(format!("Unknown jsx-curly-spacing mode \"{}\".", other)),
    };
    Ok(ConverterOutput::rule(
        ConversionNotice::new("react/jsx-curly-spacing").with_argument(json!(mode)),
    )
    .with_plugin(REACT_PLUGIN))
}

fn convert_no_default_export(_ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(
        ConverterOutput::rule(ConversionNotice::new("import/no-default-export"))
            .with_plugin(IMPORT_PLUGIN),
    )
}

fn convert_no_duplicate_imports(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("import/no-duplicates");
    if ctx
        .object_argument()
        .and_then(|options| options.get("allow-namespace-imports"))
        .and_then(Value::as_bool)
        == Some(true)
    {
        notice = notice.with_notice(unsupported_option("allow-namespace-imports"));
    }
    Ok(ConverterOutput::rule(notice).with_plugin(IMPORT_PLUGIN))
}

fn convert_no_implicit_dependencies(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();
    if ctx.has_argument("dev") {
        options.insert("devDependencies".to_string(), json!(true));
    }
    if ctx.has_argument("optional") {
        options.insert("optionalDependencies".to_string(), json!(true));
    }

    let mut notice = ConversionNotice::new("import/no-extraneous-dependencies");
    if !options.is_empty() {
        notice = notice.with_argument(Value::Object(options));
    }
    if ctx.arguments.iter().any(Value::is_array) {
        notice = notice.with_notice(
            "Whitelisted modules are not supported; use import/core-modules settings instead.",
        );
    }
    Ok(ConverterOutput::rule(notice).with_plugin(IMPORT_PLUGIN))
}

fn convert_no_null_keyword(_ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(ConverterOutput::rule(ConversionNotice::new("no-null/no-null"))
        .with_plugin("eslint-plugin-no-null"))
}

fn convert_no_redundant_jsdoc(_ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(
        ConverterOutput::rule(ConversionNotice::new("jsdoc/no-types"))
            .with_plugin(JSDOC_PLUGIN),
    )
}

fn convert_no_submodule_imports(ctx: &ConverterContext<'_>) -> ConverterResult {
    let allowed: Vec<String> = ctx
        .string_arguments()
        .map(|module| format!("{}/**", module))
        .collect();

    let notice = ConversionNotice::new("import/no-internal-modules");
    let notice = if allowed.is_empty() {
        notice
    } else {
        notice.with_argument(json!({ "allow": allowed }))
    };
    Ok(ConverterOutput::rule(notice).with_plugin(IMPORT_PLUGIN))
}

fn convert_only_arrow_functions(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();
    if ctx.has_argument("allow-declarations") {
        options.insert("allowStandaloneDeclarations".to_string(), json!(true));
    }

    let mut notice = ConversionNotice::new("prefer-arrow/prefer-arrow-functions");
    if !options.is_empty() {
        notice = notice.with_argument(Value::Object(options));
    }
    if ctx.has_argument("allow-named-functions") {
        notice = notice.with_notice(unsupported_option("allow-named-functions"));
    }
    Ok(ConverterOutput::rule(notice).with_plugin("eslint-plugin-prefer-arrow"))
}

/// Only module ordering carries over; named-import ordering is reported.
fn convert_ordered_imports(ctx: &ConverterContext<'_>) -> ConverterResult {
    let options = ctx.object_argument();
    let mut notice = ConversionNotice::new("import/order");

    let case_insensitive = options
        .and_then(|options| options.get("import-sources-order"))
        .and_then(Value::as_str)
        .is_none_or(|order| order.starts_with("case-insensitive"));
    notice = notice.with_argument(json!({
        "alphabetize": { "caseInsensitive": case_insensitive, "order": "asc" },
        "newlines-between": "ignore"
    }));

    if options.is_some_and(|options| options.contains_key("named-imports-order")) {
        notice = notice.with_notice(unsupported_option("named-imports-order"));
    }
    Ok(ConverterOutput::rule(notice).with_plugin(IMPORT_PLUGIN))
}

/// `tslint-plugin-prettier` maps onto the Prettier recommended preset.
fn convert_prettier(ctx: &ConverterContext<'_>) -> ConverterResult {
    let notice = ConversionNotice::new("prettier/prettier");
    let notice = match ctx.arguments.first() {
        Some(Value::Object(options)) => notice.with_argument(Value::Object(options.clone())),
        Some(Value::String(path)) => notice.with_notice(format!(
            "Prettier config path \"{}\" is not supported; ESLint resolves Prettier configs itself.",
            path
        )),
        _ => notice,
    };
    Ok(ConverterOutput::rule(notice)
        .with_plugin("eslint-plugin-prettier")
        .with_extends("plugin:prettier/recommended"))
}
