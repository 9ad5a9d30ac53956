//! `@typescript-eslint` rules, including the type-checked ones.

use serde_json::{Map, Value, json};

use super::unsupported_option;
use crate::converter::{
    ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry, ConverterResult,
};

pub(super) fn register(registry: &mut ConverterRegistry) {
    registry.insert("array-type", convert_array_type);
    registry.insert("await-promise", convert_await_promise);
    registry.insert("ban-types", convert_ban_types);
    registry.insert("member-access", convert_member_access);
    registry.insert("member-ordering", convert_member_ordering);
    registry.insert("no-angle-bracket-type-assertion", convert_no_angle_bracket_type_assertion);
    registry.insert("no-floating-promises", convert_no_floating_promises);
    registry.insert("no-inferrable-types", convert_no_inferrable_types);
    registry.insert("no-namespace", convert_no_namespace);
    registry.insert("no-object-literal-type-assertion", convert_no_object_literal_type_assertion);
    registry.insert("no-this-assignment", convert_no_this_assignment);
    registry.insert("no-unbound-method", convert_no_unbound_method);
    registry.insert("no-unnecessary-type-assertion", convert_no_unnecessary_type_assertion);
    registry.insert("no-unsafe-any", convert_no_unsafe_any);
    registry.insert("no-unused-expression", convert_no_unused_expression);
    registry.insert("no-void-expression", convert_no_void_expression);
    registry.insert("prefer-readonly", convert_prefer_readonly);
    registry.insert("strict-boolean-expressions", convert_strict_boolean_expressions);
    registry.insert("typedef", convert_typedef);
}

const TYPE_CHECKED_NOTICE: &str =
    "This rule needs type information; pass --type-checked once tsconfig.json is set up.";

/// Wraps converters whose ESLint rule needs type information.
///
/// Without type-checked linting the rule still converts, but the reader is
/// told it will not run.
fn type_checked(ctx: &ConverterContext<'_>, output: ConverterOutput) -> ConverterResult {
    if ctx.settings.type_checked {
        return Ok(output);
    }
    let ConverterOutput {
        rules,
        plugins,
        extends,
    } = output;
    Ok(ConverterOutput {
        rules: rules
            .into_iter()
            .map(|notice| notice.with_notice(TYPE_CHECKED_NOTICE))
            .collect(),
        plugins,
        extends,
    })
}

fn convert_array_type(ctx: &ConverterContext<'_>) -> ConverterResult {
    let style = match ctx.string_arguments().next() {
        None | Some("array") => "array",
        Some("generic") => "generic",
        Some("array-simple") => "array-simple",
        Some(other) => return Err(format!("Unknown array type style \"{}\".", other)),
    };
    Ok(ConverterOutput::rule(
        ConversionNotice::new("@typescript-eslint/array-type")
            .with_argument(json!({ "default": style })),
    ))
}

fn convert_await_promise(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("@typescript-eslint/await-thenable");
    if ctx.string_arguments().next().is_some() {
        notice = notice.with_notice(
            "ESLint does not support custom Promise-like types; only real thenables are allowed.",
        );
    }
    type_checked(ctx, ConverterOutput::rule(notice))
}

/// Banned types become `{ types: { Name: message | true } }`.
fn convert_ban_types(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut types = Map::new();
    for argument in ctx.arguments {
        let Some(entry) = argument.as_array() else {
            return Err(format!("Unsupported ban-types entry {}.", argument));
        };
        match entry.as_slice() {
            [Value::String(name)] => {
                types.insert(name.clone(), json!(true));
            }
            [Value::String(name), Value::String(message), ..] => {
                types.insert(name.clone(), json!({ "message": message }));
            }
            _ => return Err(format!("Unsupported ban-types entry {}.", argument)),
        }
    }

    let notice = ConversionNotice::new("@typescript-eslint/ban-types");
    let notice = if types.is_empty() {
        notice
    } else {
        notice.with_argument(json!({ "types": types }))
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_member_access(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();

    if ctx.has_argument("no-public") {
        options.insert("accessibility".to_string(), json!("no-public"));
    } else {
        options.insert("accessibility".to_string(), json!("explicit"));
        let mut overrides = Map::new();
        if !ctx.has_argument("check-accessor") {
            overrides.insert("accessors".to_string(), json!("off"));
        }
        if !ctx.has_argument("check-constructor") {
            overrides.insert("constructors".to_string(), json!("off"));
        }
        if !ctx.has_argument("check-parameter-property") {
            overrides.insert("parameterProperties".to_string(), json!("off"));
        }
        if !overrides.is_empty() {
            options.insert("overrides".to_string(), Value::Object(overrides));
        }
    }

    Ok(ConverterOutput::rule(
        ConversionNotice::new("@typescript-eslint/explicit-member-accessibility")
            .with_argument(Value::Object(options)),
    ))
}

fn convert_member_ordering(ctx: &ConverterContext<'_>) -> ConverterResult {
    let order = ctx
        .object_argument()
        .and_then(|options| options.get("order"));

    let notice = ConversionNotice::new("@typescript-eslint/member-ordering");
    let notice = match order {
        None => notice,
        Some(Value::Array(members)) => {
            let converted = members
                .iter()
                .map(|member| match member {
                    Value::String(_) => Ok(member.clone()),
                    other => Err(format!("Unsupported member-ordering entry {}.", other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            notice.with_argument(json!({ "default": converted }))
        }
        Some(Value::String(preset)) => notice.with_notice(format!(
            "Preset order \"{}\" is replaced by the ESLint default order.",
            preset
        )),
        Some(other) => return Err(format!("Unsupported member-ordering order {}.", other)),
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_angle_bracket_type_assertion(_ctx: &ConverterContext<'_>) -> ConverterResult {
    Ok(ConverterOutput::rule(
        ConversionNotice::new("@typescript-eslint/consistent-type-assertions")
            .with_argument(json!({ "assertionStyle": "as" })),
    ))
}

fn convert_no_floating_promises(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("@typescript-eslint/no-floating-promises");
    if ctx.string_arguments().next().is_some() {
        notice = notice.with_notice(
            "ESLint does not support custom Promise-like types; only real Promises are checked.",
        );
    }
    type_checked(ctx, ConverterOutput::rule(notice))
}

fn convert_no_inferrable_types(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();
    if ctx.has_argument("ignore-params") {
        options.insert("ignoreParameters".to_string(), json!(true));
    }
    if ctx.has_argument("ignore-properties") {
        options.insert("ignoreProperties".to_string(), json!(true));
    }

    let notice = ConversionNotice::new("@typescript-eslint/no-inferrable-types");
    let notice = if options.is_empty() {
        notice
    } else {
        notice.with_argument(Value::Object(options))
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_namespace(ctx: &ConverterContext<'_>) -> ConverterResult {
    let notice = ConversionNotice::new("@typescript-eslint/no-namespace");
    let notice = if ctx.has_argument("allow-declarations") {
        notice.with_argument(json!({ "allowDeclarations": true }))
    } else {
        notice
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_object_literal_type_assertion(ctx: &ConverterContext<'_>) -> ConverterResult {
    let allow_arguments = ctx
        .object_argument()
        .and_then(|options| options.get("allow-arguments"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let literal_assertions = if allow_arguments {
        "allow-as-parameter"
    } else {
        "never"
    };
    Ok(ConverterOutput::rule(
        ConversionNotice::new("@typescript-eslint/consistent-type-assertions").with_argument(
            json!({ "assertionStyle": "as", "objectLiteralTypeAssertions": literal_assertions }),
        ),
    ))
}

fn convert_no_this_assignment(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();
    if let Some(config) = ctx.object_argument() {
        if let Some(names) = config.get("allowed-names") {
            options.insert("allowedNames".to_string(), names.clone());
        }
        if config.get("allow-destructuring").and_then(Value::as_bool) == Some(true) {
            options.insert("allowDestructuring".to_string(), json!(true));
        }
    }

    let notice = ConversionNotice::new("@typescript-eslint/no-this-alias");
    let notice = if options.is_empty() {
        notice
    } else {
        notice.with_argument(Value::Object(options))
    };
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_unbound_method(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("@typescript-eslint/unbound-method");
    if ctx.has_argument("ignore-static") {
        notice = notice.with_argument(json!({ "ignoreStatic": true }));
    }
    if ctx.has_argument("whitelist") {
        notice = notice.with_notice(unsupported_option("whitelist"));
    }
    type_checked(ctx, ConverterOutput::rule(notice))
}

fn convert_no_unnecessary_type_assertion(ctx: &ConverterContext<'_>) -> ConverterResult {
    let types: Vec<&str> = ctx.string_arguments().collect();
    let notice = ConversionNotice::new("@typescript-eslint/no-unnecessary-type-assertion");
    let notice = if types.is_empty() {
        notice
    } else {
        notice.with_argument(json!({ "typesToIgnore": types }))
    };
    type_checked(ctx, ConverterOutput::rule(notice))
}

/// `no-unsafe-any` is covered by five narrower ESLint rules.
fn convert_no_unsafe_any(ctx: &ConverterContext<'_>) -> ConverterResult {
    let rules = [
        "@typescript-eslint/no-unsafe-argument",
        "@typescript-eslint/no-unsafe-assignment",
        "@typescript-eslint/no-unsafe-call",
        "@typescript-eslint/no-unsafe-member-access",
        "@typescript-eslint/no-unsafe-return",
    ]
    .into_iter()
    .map(ConversionNotice::new)
    .collect();
    type_checked(ctx, ConverterOutput::rules(rules))
}

fn convert_no_unused_expression(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();
    if ctx.has_argument("allow-fast-null-checks") {
        options.insert("allowShortCircuit".to_string(), json!(true));
    }
    if ctx.has_argument("allow-tagged-template") {
        options.insert("allowTaggedTemplates".to_string(), json!(true));
    }

    let mut notice = ConversionNotice::new("@typescript-eslint/no-unused-expressions");
    if !options.is_empty() {
        notice = notice.with_argument(Value::Object(options));
    }
    if ctx.has_argument("allow-new") {
        notice = notice.with_notice(unsupported_option("allow-new"));
    }
    Ok(ConverterOutput::rule(notice))
}

fn convert_no_void_expression(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut notice = ConversionNotice::new("@typescript-eslint/no-confusing-void-expression");
    if ctx.has_argument("ignore-arrow-function-shorthand") {
        notice = notice.with_argument(json!({ "ignoreArrowShorthand": true }));
    }
    type_checked(ctx, ConverterOutput::rule(notice))
}

fn convert_prefer_readonly(ctx: &ConverterContext<'_>) -> ConverterResult {
    let notice = ConversionNotice::new("@typescript-eslint/prefer-readonly");
    let notice = if ctx.has_argument("only-inline-lambdas") {
        notice.with_argument(json!({ "onlyInlineLambdas": true }))
    } else {
        notice
    };
    type_checked(ctx, ConverterOutput::rule(notice))
}

fn convert_strict_boolean_expressions(ctx: &ConverterContext<'_>) -> ConverterResult {
    let mut options = Map::new();
    let flags = [
        ("allow-string", "allowString"),
        ("allow-number", "allowNumber"),
        ("allow-null-union", "allowNullableObject"),
        ("allow-boolean-or-undefined", "allowNullableBoolean"),
        ("allow-any-type", "allowAny"),
    ];
    for (tslint_flag, eslint_option) in flags {
        if ctx.has_argument(tslint_flag) {
            options.insert(eslint_option.to_string(), json!(true));
        }
    }

    let mut notice = ConversionNotice::new("@typescript-eslint/strict-boolean-expressions");
    if !options.is_empty() {
        notice = notice.with_argument(Value::Object(options));
    }
    if ctx.has_argument("ignore-rhs") {
        notice = notice.with_notice(unsupported_option("ignore-rhs"));
    }
    type_checked(ctx, ConverterOutput::rule(notice))
}

/// `typedef` splits into the ESLint rule and, for call signatures,
/// `explicit-function-return-type`.
fn convert_typedef(ctx: &ConverterContext<'_>) -> ConverterResult {
    let flags = [
        ("array-destructuring", "arrayDestructuring"),
        ("arrow-parameter", "arrowParameter"),
        ("member-variable-declaration", "memberVariableDeclaration"),
        ("object-destructuring", "objectDestructuring"),
        ("parameter", "parameter"),
        ("property-declaration", "propertyDeclaration"),
        ("variable-declaration", "variableDeclaration"),
        ("variable-declaration-ignore-function", "variableDeclarationIgnoreFunction"),
    ];

    let mut options = Map::new();
    for (tslint_flag, eslint_option) in flags {
        if ctx.has_argument(tslint_flag) {
            options.insert(eslint_option.to_string(), json!(true));
        }
    }

    let mut rules = vec![
        ConversionNotice::new("@typescript-eslint/typedef").with_argument(Value::Object(options)),
    ];

    if ctx.has_argument("call-signature") {
        rules.push(ConversionNotice::new(
            "@typescript-eslint/explicit-function-return-type",
        ));
    } else if ctx.has_argument("arrow-call-signature") {
        rules.push(
            ConversionNotice::new("@typescript-eslint/explicit-function-return-type")
                .with_argument(json!({ "allowExpressions": true })),
        );
    }

    Ok(ConverterOutput::rules(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionSettings;
    use crate::converters::test_utils::{run, run_with, summarize};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::default(vec![], "array")]
    #[case::generic(vec![json!("generic")], "generic")]
    #[case::simple(vec![json!("array-simple")], "array-simple")]
    fn test_array_type(#[case] arguments: Vec<Value>, #[case] expected: &str) {
        let output = run(convert_array_type, arguments).unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({ "default": expected })]
        );
    }

    #[test]
    fn test_array_type_unknown_style() {
        assert!(run(convert_array_type, vec![json!("tuple")]).is_err());
    }

    #[test]
    fn test_ban_types() {
        let output = run(
            convert_ban_types,
            vec![json!(["Object", "Use {} instead."]), json!(["Function"])],
        )
        .unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({ "types": {
                "Object": { "message": "Use {} instead." },
                "Function": true
            }})]
        );
    }

    #[test]
    fn test_member_access_default_overrides() {
        let output = run(convert_member_access, vec![json!("check-accessor")]).unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({
                "accessibility": "explicit",
                "overrides": { "constructors": "off", "parameterProperties": "off" }
            })]
        );
    }

    #[test]
    fn test_member_access_no_public() {
        let output = run(convert_member_access, vec![json!("no-public")]).unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({ "accessibility": "no-public" })]
        );
    }

    #[test]
    fn test_member_ordering_preset_is_noted() {
        let output = run(
            convert_member_ordering,
            vec![json!({ "order": "fields-first" })],
        )
        .unwrap();
        assert!(output.rules[0].rule_arguments.is_empty());
        assert_eq!(output.rules[0].notices.len(), 1);
    }

    #[test]
    fn test_object_literal_type_assertion() {
        let output = run(
            convert_no_object_literal_type_assertion,
            vec![json!({ "allow-arguments": true })],
        )
        .unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({
                "assertionStyle": "as",
                "objectLiteralTypeAssertions": "allow-as-parameter"
            })]
        );
    }

    #[test]
    fn test_no_unsafe_any_fans_out() {
        let output = run(convert_no_unsafe_any, vec![]).unwrap();
        let names: Vec<&str> = output.rules.iter().map(|r| r.rule_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "@typescript-eslint/no-unsafe-argument",
                "@typescript-eslint/no-unsafe-assignment",
                "@typescript-eslint/no-unsafe-call",
                "@typescript-eslint/no-unsafe-member-access",
                "@typescript-eslint/no-unsafe-return",
            ]
        );
    }

    #[test]
    fn test_type_checked_rules_note_missing_type_information() {
        let output = run(convert_await_promise, vec![]).unwrap();
        assert_eq!(output.rules[0].notices, vec![TYPE_CHECKED_NOTICE]);

        let settings = ConversionSettings {
            type_checked: true,
            ..ConversionSettings::default()
        };
        let output = run_with(convert_await_promise, vec![], &settings).unwrap();
        assert!(output.rules[0].notices.is_empty());
    }

    #[test]
    fn test_no_unused_expression_options() {
        let output = run(
            convert_no_unused_expression,
            vec![json!("allow-fast-null-checks"), json!("allow-new")],
        )
        .unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({ "allowShortCircuit": true })]
        );
        assert_eq!(output.rules[0].notices, vec![unsupported_option("allow-new")]);
    }

    #[test]
    fn test_typedef_call_signature() {
        let output = run(
            convert_typedef,
            vec![json!("call-signature"), json!("parameter")],
        )
        .unwrap();
        assert_eq!(
            summarize(&output),
            vec![
                (
                    "@typescript-eslint/typedef".to_string(),
                    vec![json!({ "parameter": true })]
                ),
                (
                    "@typescript-eslint/explicit-function-return-type".to_string(),
                    vec![]
                ),
            ]
        );
    }

    #[test]
    fn test_no_angle_bracket_uses_as_style() {
        let output = run(convert_no_angle_bracket_type_assertion, vec![]).unwrap();
        assert_eq!(output.rules[0].severity, None);
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({ "assertionStyle": "as" })]
        );
    }

    #[test]
    fn test_no_namespace_allows_declarations() {
        let output = run(convert_no_namespace, vec![json!("allow-declarations")]).unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({ "allowDeclarations": true })]
        );
    }
}
