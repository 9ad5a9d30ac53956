//! Built-in TSLint rule converters.
//!
//! Rules whose ESLint equivalent takes no options are listed in
//! [`RENAMED_RULES`]; everything else has a dedicated converter function in
//! one of the submodules.

mod best_practices;
mod naming;
mod plugins;
mod style;
mod typescript;

use crate::converter::{
    ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry, ConverterResult,
};

/// TSLint rules that map one-to-one onto an option-less ESLint rule.
pub const RENAMED_RULES: &[(&str, &str)] = &[
    ("adjacent-overload-signatures", "@typescript-eslint/adjacent-overload-signatures"),
    ("ban-comma-operator", "no-sequences"),
    ("callable-types", "@typescript-eslint/prefer-function-type"),
    ("label-position", "no-labels"),
    ("no-any", "@typescript-eslint/no-explicit-any"),
    ("no-arg", "no-caller"),
    ("no-bitwise", "no-bitwise"),
    ("no-conditional-assignment", "no-cond-assign"),
    ("no-construct", "no-new-wrappers"),
    ("no-debugger", "no-debugger"),
    ("no-duplicate-super", "constructor-super"),
    ("no-duplicate-switch-case", "no-duplicate-case"),
    ("no-duplicate-variable", "no-redeclare"),
    ("no-dynamic-delete", "@typescript-eslint/no-dynamic-delete"),
    ("no-empty-interface", "@typescript-eslint/no-empty-interface"),
    ("no-eval", "no-eval"),
    ("no-for-in-array", "@typescript-eslint/no-for-in-array"),
    ("no-internal-module", "@typescript-eslint/prefer-namespace-keyword"),
    ("no-invalid-template-strings", "no-template-curly-in-string"),
    ("no-invalid-this", "no-invalid-this"),
    ("no-irregular-whitespace", "no-irregular-whitespace"),
    ("no-misused-new", "@typescript-eslint/no-misused-new"),
    ("no-non-null-assertion", "@typescript-eslint/no-non-null-assertion"),
    ("no-parameter-properties", "@typescript-eslint/parameter-properties"),
    ("no-parameter-reassignment", "no-param-reassign"),
    ("no-require-imports", "@typescript-eslint/no-require-imports"),
    ("no-return-await", "no-return-await"),
    ("no-sparse-arrays", "no-sparse-arrays"),
    ("no-string-literal", "@typescript-eslint/dot-notation"),
    ("no-string-throw", "no-throw-literal"),
    ("no-switch-case-fall-through", "no-fallthrough"),
    ("no-unnecessary-class", "@typescript-eslint/no-extraneous-class"),
    ("no-unnecessary-initializer", "no-undef-init"),
    ("no-unnecessary-qualifier", "@typescript-eslint/no-unnecessary-qualifier"),
    ("no-unsafe-finally", "no-unsafe-finally"),
    ("no-unused-variable", "@typescript-eslint/no-unused-vars"),
    ("no-var-keyword", "no-var"),
    ("no-var-requires", "@typescript-eslint/no-var-requires"),
    ("prefer-for-of", "@typescript-eslint/prefer-for-of"),
    ("prefer-object-spread", "prefer-object-spread"),
    ("prefer-template", "prefer-template"),
    ("promise-function-async", "@typescript-eslint/promise-function-async"),
    ("radix", "radix"),
    ("restrict-plus-operands", "@typescript-eslint/restrict-plus-operands"),
    ("unified-signatures", "@typescript-eslint/unified-signatures"),
    ("use-isnan", "use-isnan"),
];

/// TSLint rules that are intentionally converted to nothing.
pub const RETIRED_RULES: &[&str] = &["import-spacing", "no-reference-import"];

/// Builds the registry of every built-in converter.
pub fn builtin_converters() -> ConverterRegistry {
    let mut registry = ConverterRegistry::new();

    for &(tslint_rule, eslint_rule) in RENAMED_RULES {
        registry.insert(tslint_rule, renamed(eslint_rule));
    }
    for &tslint_rule in RETIRED_RULES {
        registry.insert(tslint_rule, |_: &ConverterContext<'_>| Ok(ConverterOutput::none()));
    }

    style::register(&mut registry);
    best_practices::register(&mut registry);
    typescript::register(&mut registry);
    naming::register(&mut registry);
    plugins::register(&mut registry);

    registry
}

fn renamed(
    eslint_rule: &'static str,
) -> impl Fn(&ConverterContext<'_>) -> ConverterResult + Send + Sync + 'static {
    move |_| Ok(ConverterOutput::rule(ConversionNotice::new(eslint_rule)))
}

/// Notice for a TSLint option that has no ESLint counterpart.
fn unsupported_option(option: &str) -> String {
    format!("Option \"{}\" is not supported by ESLint.", option)
}
