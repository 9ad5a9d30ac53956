//! Formatting rules.
//!
//! When Prettier owns formatting these all convert to nothing.

use serde_json::{Map, Value, json};

use super::unsupported_option;
use crate::converter::{
    ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry, ConverterResult,
};

pub(super) fn register(registry: &mut ConverterRegistry) {
    registry.insert("arrow-parens", convert_arrow_parens);
    registry.insert("eofline", convert_eofline);
    registry.insert("indent", convert_indent);
    registry.insert("linebreak-style", convert_linebreak_style);
    registry.insert("max-line-length", convert_max_line_length);
    registry.insert("new-parens", convert_new_parens);
    registry.insert("no-consecutive-blank-lines", convert_no_consecutive_blank_lines);
    registry.insert("no-trailing-whitespace", convert_no_trailing_whitespace);
    registry.insert("object-literal-key-quotes", convert_object_literal_key_quotes);
    registry.insert("quotemark", convert_quotemark);
    registry.insert("semicolon", convert_semicolon);
    registry.insert("space-before-function-paren", convert_space_before_function_paren);
    registry.insert("trailing-comma", convert_trailing_comma);
}

fn formatting(
    ctx: &ConverterContext<'_>,
    convert: impl FnOnce() -> ConverterResult,
) -> ConverterResult {
    if ctx.settings.prettier {
        return Ok(ConverterOutput::none());
    }
    convert()
}

fn convert_arrow_parens(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let notice = ConversionNotice::new("arrow-parens");
        let notice = if ctx.has_argument("ban-single-arg-parens") {
            notice.with_argument(json!("as-needed"))
        } else {
            notice
        };
        Ok(ConverterOutput::rule(notice))
    })
}

fn convert_eofline(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || Ok(ConverterOutput::rule(ConversionNotice::new("eol-last"))))
}

fn convert_indent(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let notice = ConversionNotice::new("@typescript-eslint/indent");
        let notice = match ctx.arguments.first().and_then(Value::as_str) {
            None => notice,
            Some("tabs") => notice.with_argument(json!("tab")),
            Some("spaces") => match ctx.arguments.get(1).and_then(Value::as_u64) {
                Some(size) => notice.with_argument(json!(size)),
                None => notice,
            },
            Some(other) => return Err(format!("Unknown indent type \"{}\".", other)),
        };
        Ok(ConverterOutput::rule(notice))
    })
}

fn convert_linebreak_style(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let style = match ctx.string_arguments().next() {
            None | Some("LF") => "unix",
            Some("CRLF") => "windows",
            Some(other) => return Err(format!("Unknown linebreak style \"{}\".", other)),
        };
        Ok(ConverterOutput::rule(
            ConversionNotice::new("linebreak-style").with_argument(json!(style)),
        ))
    })
}

fn convert_max_line_length(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let notice = ConversionNotice::new("max-len");

        if let Some(limit) = ctx.number_argument() {
            return Ok(ConverterOutput::rule(
                notice.with_argument(json!({ "code": limit })),
            ));
        }

        let Some(options) = ctx.object_argument() else {
            return Ok(ConverterOutput::rule(notice));
        };

        let mut argument = Map::new();
        if let Some(limit) = options.get("limit") {
            argument.insert("code".to_string(), limit.clone());
        }
        if let Some(pattern) = options.get("ignore-pattern") {
            argument.insert("ignorePattern".to_string(), pattern.clone());
        }
        let check_strings = options
            .get("check-strings")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let check_regex = options
            .get("check-regex")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        argument.insert("ignoreStrings".to_string(), json!(!check_strings));
        argument.insert("ignoreRegExpLiterals".to_string(), json!(!check_regex));

        Ok(ConverterOutput::rule(
            notice.with_argument(Value::Object(argument)),
        ))
    })
}

fn convert_new_parens(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || Ok(ConverterOutput::rule(ConversionNotice::new("new-parens"))))
}

fn convert_no_consecutive_blank_lines(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let max = ctx.number_argument().cloned().unwrap_or(json!(1));
        Ok(ConverterOutput::rule(
            ConversionNotice::new("no-multiple-empty-lines").with_argument(json!({ "max": max })),
        ))
    })
}

fn convert_no_trailing_whitespace(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let mut notice = ConversionNotice::new("no-trailing-spaces");
        let mut argument = Map::new();

        if ctx.has_argument("ignore-comments") || ctx.has_argument("ignore-jsdoc") {
            argument.insert("ignoreComments".to_string(), json!(true));
        }
        if ctx.has_argument("ignore-blank-lines") {
            argument.insert("skipBlankLines".to_string(), json!(true));
        }
        if ctx.has_argument("ignore-template-strings") {
            notice = notice.with_notice(unsupported_option("ignore-template-strings"));
        }
        if !argument.is_empty() {
            notice = notice.with_argument(Value::Object(argument));
        }

        Ok(ConverterOutput::rule(notice))
    })
}

fn convert_object_literal_key_quotes(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let mode = match ctx.string_arguments().next() {
            None => None,
            Some(mode @ ("always" | "as-needed" | "consistent" | "consistent-as-needed")) => {
                Some(mode)
            }
            Some(other) => return Err(format!("Unknown key quotes mode \"{}\".", other)),
        };
        let notice = ConversionNotice::new("quote-props");
        let notice = match mode {
            Some(mode) => notice.with_argument(json!(mode)),
            None => notice,
        };
        Ok(ConverterOutput::rule(notice))
    })
}

fn convert_quotemark(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let style = ctx
            .string_arguments()
            .find(|arg| matches!(*arg, "single" | "double" | "backtick"))
            .unwrap_or("double");

        let mut options = Map::new();
        if ctx.has_argument("avoid-escape") {
            options.insert("avoidEscape".to_string(), json!(true));
        }
        if style != "backtick" && !ctx.has_argument("avoid-template") {
            options.insert("allowTemplateLiterals".to_string(), json!(true));
        }

        let mut quotes =
            ConversionNotice::new("@typescript-eslint/quotes").with_argument(json!(style));
        if !options.is_empty() {
            quotes = quotes.with_argument(Value::Object(options));
        }

        let mut rules = vec![quotes];
        if ctx.has_argument("jsx-single") {
            rules.push(ConversionNotice::new("jsx-quotes").with_argument(json!("prefer-single")));
        } else if ctx.has_argument("jsx-double") {
            rules.push(ConversionNotice::new("jsx-quotes").with_argument(json!("prefer-double")));
        }

        Ok(ConverterOutput::rules(rules))
    })
}

fn convert_semicolon(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let mode = match ctx.string_arguments().next() {
            None | Some("always") => "always",
            Some("never") => "never",
            Some(other) => return Err(format!("Unknown semicolon mode \"{}\".", other)),
        };

        let mut semi = ConversionNotice::new("@typescript-eslint/semi").with_argument(json!(mode));
        for option in ["ignore-bound-class-methods", "strict-bound-class-methods"] {
            if ctx.has_argument(option) {
                semi = semi.with_notice(unsupported_option(option));
            }
        }

        let mut rules = vec![semi];
        if !ctx.has_argument("ignore-interfaces") {
            let delimiter = if mode == "always" {
                ConversionNotice::new("@typescript-eslint/member-delimiter-style")
            } else {
                ConversionNotice::new("@typescript-eslint/member-delimiter-style").with_argument(
                    json!({
                        "multiline": { "delimiter": "none" },
                        "singleline": { "delimiter": "semi", "requireLast": false }
                    }),
                )
            };
            rules.push(delimiter);
        }

        Ok(ConverterOutput::rules(rules))
    })
}

fn convert_space_before_function_paren(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let notice = ConversionNotice::new("@typescript-eslint/space-before-function-paren");

        if let Some(mode) = ctx.string_arguments().next() {
            return Ok(ConverterOutput::rule(notice.with_argument(json!(mode))));
        }
        let Some(options) = ctx.object_argument() else {
            return Ok(ConverterOutput::rule(notice));
        };

        let mut argument = Map::new();
        let mut notice = notice;
        for (key, value) in options {
            match key.as_str() {
                "anonymous" | "named" | "asyncArrow" => {
                    argument.insert(key.clone(), value.clone());
                }
                other => notice = notice.with_notice(unsupported_option(other)),
            }
        }

        Ok(ConverterOutput::rule(notice.with_argument(Value::Object(argument))))
    })
}

fn convert_trailing_comma(ctx: &ConverterContext<'_>) -> ConverterResult {
    formatting(ctx, || {
        let notice = ConversionNotice::new("comma-dangle");
        let Some(options) = ctx.object_argument() else {
            return Ok(ConverterOutput::rule(notice));
        };

        let mode = match (
            trailing_comma_setting(options, "multiline")?,
            trailing_comma_setting(options, "singleline")?,
        ) {
            (Some("always"), Some("always")) => "always",
            (Some("always"), _) => "always-multiline",
            (None | Some("never"), None | Some("never")) => "never",
            (_, Some("always")) => {
                return Err("Trailing commas on single lines only cannot be expressed.".to_string());
            }
            (multiline, singleline) => {
                return Err(format!(
                    "Unknown trailing-comma settings {:?}/{:?}.",
                    multiline, singleline
                ));
            }
        };

        let mut notice = notice.with_argument(json!(mode));
        if options.contains_key("esSpecCompliant") {
            notice = notice.with_notice(unsupported_option("esSpecCompliant"));
        }
        Ok(ConverterOutput::rule(notice))
    })
}

fn trailing_comma_setting<'a>(
    options: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, String> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(format!(
            "Per-construct \"{}\" trailing-comma settings are not supported.",
            key
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionSettings;
    use crate::converters::test_utils::{run, run_with, summarize};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::default(vec![], vec![])]
    #[case::tabs(vec![json!("tabs")], vec![json!("tab")])]
    #[case::spaces_with_size(vec![json!("spaces"), json!(2)], vec![json!(2)])]
    #[case::spaces_without_size(vec![json!("spaces")], vec![])]
    fn test_indent(#[case] arguments: Vec<Value>, #[case] expected: Vec<Value>) {
        let output = run(convert_indent, arguments).unwrap();
        assert_eq!(
            summarize(&output),
            vec![("@typescript-eslint/indent".to_string(), expected)]
        );
    }

    #[test]
    fn test_indent_unknown_type_fails() {
        let error = run(convert_indent, vec![json!("tabz")]).unwrap_err();
        assert!(error.contains("tabz"));
    }

    #[test]
    fn test_formatting_rules_vanish_with_prettier() {
        let settings = ConversionSettings {
            prettier: true,
            ..ConversionSettings::default()
        };
        let output = run_with(convert_quotemark, vec![json!("single")], &settings).unwrap();
        assert_eq!(output, ConverterOutput::none());
    }

    #[rstest]
    #[case::single_escape(
        vec![json!("single"), json!("avoid-escape"), json!("avoid-template")],
        vec![(
            "@typescript-eslint/quotes",
            vec![json!("single"), json!({ "avoidEscape": true })]
        )]
    )]
    #[case::double_templates_allowed(
        vec![json!("double")],
        vec![(
            "@typescript-eslint/quotes",
            vec![json!("double"), json!({ "allowTemplateLiterals": true })]
        )]
    )]
    #[case::jsx(
        vec![json!("backtick"), json!("jsx-double")],
        vec![
            ("@typescript-eslint/quotes", vec![json!("backtick")]),
            ("jsx-quotes", vec![json!("prefer-double")]),
        ]
    )]
    fn test_quotemark(#[case] arguments: Vec<Value>, #[case] expected: Vec<(&str, Vec<Value>)>) {
        let output = run(convert_quotemark, arguments).unwrap();
        let expected: Vec<(String, Vec<Value>)> = expected
            .into_iter()
            .map(|(name, args)| (name.to_string(), args))
            .collect();
        assert_eq!(summarize(&output), expected);
    }

    #[test]
    fn test_max_line_length_object() {
        let output = run(
            convert_max_line_length,
            vec![json!({ "limit": 120, "ignore-pattern": "^import ", "check-strings": true })],
        )
        .unwrap();
        assert_eq!(
            output.rules[0].rule_arguments,
            vec![json!({
                "code": 120,
                "ignorePattern": "^import ",
                "ignoreStrings": false,
                "ignoreRegExpLiterals": true
            })]
        );
    }

    #[test]
    fn test_max_line_length_number() {
        let output = run(convert_max_line_length, vec![json!(100)]).unwrap();
        assert_eq!(output.rules[0].rule_arguments, vec![json!({ "code": 100 })]);
    }

    #[test]
    fn test_semicolon_never_fans_out() {
        let output = run(
            convert_semicolon,
            vec![json!("never"), json!("strict-bound-class-methods")],
        )
        .unwrap();
        assert_eq!(output.rules.len(), 2);
        assert_eq!(output.rules[0].rule_arguments, vec![json!("never")]);
        assert_eq!(
            output.rules[0].notices,
            vec![unsupported_option("strict-bound-class-methods")]
        );
        assert_eq!(output.rules[1].rule_name, "@typescript-eslint/member-delimiter-style");
    }

    #[test]
    fn test_semicolon_ignore_interfaces() {
        let output = run(convert_semicolon, vec![json!("always"), json!("ignore-interfaces")])
            .unwrap();
        assert_eq!(output.rules.len(), 1);
    }

    #[rstest]
    #[case::always_multiline(
        json!({ "multiline": "always", "singleline": "never" }),
        "always-multiline"
    )]
    #[case::always(json!({ "multiline": "always", "singleline": "always" }), "always")]
    #[case::never(json!({ "multiline": "never" }), "never")]
    fn test_trailing_comma(#[case] options: Value, #[case] expected: &str) {
        let output = run(convert_trailing_comma, vec![options]).unwrap();
        assert_eq!(output.rules[0].rule_arguments, vec![json!(expected)]);
    }

    #[test]
    fn test_trailing_comma_per_construct_fails() {
        let result = run(
            convert_trailing_comma,
            vec![json!({ "multiline": { "objects": "always" } })],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_object_literal_key_quotes_unknown_mode() {
        assert!(run(convert_object_literal_key_quotes, vec![json!("sometimes")]).is_err());
        let output = run(convert_object_literal_key_quotes, vec![json!("as-needed")]).unwrap();
        assert_eq!(output.rules[0].rule_arguments, vec![json!("as-needed")]);
    }
}
