//! Whole-configuration conversion: presets first, then rules.

use serde::Serialize;

use crate::convert_rules::{ConvertRulesDependencies, convert_rules};
use crate::extends::{ExtendsConversion, convert_extends};
use crate::results::OrderedSet;
use crate::{ConversionResults, ConversionSettings, EslintConfig, TslintConfig};

/// Everything converted from one TSLint configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigConversion {
    /// Rule conversion results; `extends` and `plugins` include the
    /// contributions of converted presets, which come first.
    pub rules: ConversionResults,

    /// TSLint presets without an ESLint counterpart.
    pub missing_extends: Vec<String>,
}

/// Converts a TSLint configuration against an optional existing ESLint one.
pub fn convert_config(
    dependencies: &ConvertRulesDependencies<'_>,
    tslint: &TslintConfig,
    eslint: Option<&EslintConfig>,
    settings: &ConversionSettings,
) -> ConfigConversion {
    let ExtendsConversion {
        extends,
        plugins,
        missing,
    } = convert_extends(&tslint.extends, settings);

    let mut rules = convert_rules(
        dependencies,
        &tslint.rules,
        eslint.map(|config| &config.rules),
        settings,
    );

    rules.extends = prepend(extends, &rules.extends);
    rules.plugins = prepend(plugins, &rules.plugins);

    ConfigConversion {
        rules,
        missing_extends: missing,
    }
}

fn prepend(first: Vec<String>, rest: &OrderedSet) -> OrderedSet {
    first
        .into_iter()
        .chain(rest.iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::builtin_converters;
    use crate::mergers::builtin_mergers;
    use crate::results::RuleStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_presets_come_before_rule_extends() {
        let converters = builtin_converters();
        let mergers = builtin_mergers();
        let dependencies = ConvertRulesDependencies {
            converters: &converters,
            mergers: &mergers,
        };
        let tslint = TslintConfig::from_jsonc(
            r#"{
                "extends": ["tslint-react", "tslint-config-unknown"],
                "rules": { "prettier": true, "jsx-key": true, "no-var-keyword": true }
            }"#,
        )
        .unwrap();

        let conversion = convert_config(&dependencies, &tslint, None, &ConversionSettings::new());

        assert_eq!(
            conversion.rules.extends.as_slice(),
            &["plugin:react/recommended", "plugin:prettier/recommended"]
        );
        assert_eq!(
            conversion.rules.plugins.as_slice(),
            &["eslint-plugin-react", "eslint-plugin-prettier"]
        );
        assert_eq!(conversion.missing_extends, vec!["tslint-config-unknown"]);
        assert_eq!(
            conversion.rules.status_of("no-var-keyword"),
            Some(RuleStatus::Converted)
        );
    }

    #[test]
    fn test_existing_eslint_rules_win() {
        let converters = builtin_converters();
        let mergers = builtin_mergers();
        let dependencies = ConvertRulesDependencies {
            converters: &converters,
            mergers: &mergers,
        };
        let tslint =
            TslintConfig::from_jsonc(r#"{ "rules": { "no-var-keyword": true } }"#).unwrap();
        let eslint = EslintConfig::from_jsonc(r#"{ "rules": { "no-var": "off" } }"#).unwrap();

        let conversion = convert_config(
            &dependencies,
            &tslint,
            Some(&eslint),
            &ConversionSettings::new(),
        );

        assert!(conversion.rules.converted.is_empty());
        assert_eq!(conversion.rules.conflicts.len(), 1);
        assert_eq!(conversion.rules.conflicts[0].existing, json!("off"));
    }
}
