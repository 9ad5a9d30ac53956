//! Conversion orchestrator: runs every source rule through the converters,
//! merges the proposals and reconciles them with the existing configuration.

use serde_json::{Map, Value};
use tracing::debug;

use crate::converter::{ConverterRegistry, RuleConversion, convert_rule};
use crate::merge::{MergeOutcome, ProposedRule, merge_proposals};
use crate::merger::MergerRegistry;
use crate::results::{RuleConflict, RuleEquivalent, RuleOutcome, RuleStatus};
use crate::{ConversionError, ConversionResults, ConversionSettings, SourceRule};

/// Registries the orchestrator runs against.
#[derive(Debug, Clone, Copy)]
pub struct ConvertRulesDependencies<'a> {
    /// Source rule converters.
    pub converters: &'a ConverterRegistry,

    /// Target rule mergers.
    pub mergers: &'a MergerRegistry,
}

/// Converts a full TSLint rule set.
///
/// Rules are processed strictly in input order and a failing rule never stops
/// the batch. `existing_rules` is the `rules` object of a pre-existing ESLint
/// configuration: any target rule it already defines is left to the user and
/// reported as a conflict instead of being converted.
pub fn convert_rules(
    dependencies: &ConvertRulesDependencies<'_>,
    rules: &[SourceRule],
    existing_rules: Option<&Map<String, Value>>,
    settings: &ConversionSettings,
) -> ConversionResults {
    let mut results = ConversionResults::new();
    let mut proposals = Vec::new();
    let mut contributions = Vec::new();

    for rule in rules {
        let status = match convert_rule(rule, dependencies.converters, settings) {
            RuleConversion::Missing => {
                results.missing.push(rule.clone());
                RuleStatus::Missing
            }
            RuleConversion::Failed(error) => {
                results.failed.push(error);
                RuleStatus::Failed
            }
            RuleConversion::Converted(output) => {
                let mut target_rules: Vec<String> = Vec::new();
                for notice in output.rules {
                    if !target_rules.contains(&notice.rule_name) {
                        target_rules.push(notice.rule_name.clone());
                    }
                    proposals.push(ProposedRule {
                        source_rule: rule.name.clone(),
                        rule_name: notice.rule_name,
                        arguments: notice.rule_arguments,
                        severity: notice.severity.unwrap_or(rule.severity),
                        notices: notice.notices,
                    });
                }
                contributions.push(Contribution {
                    rule_name: rule.name.clone(),
                    target_rules,
                    plugins: output.plugins,
                    extends: output.extends,
                });
                RuleStatus::Converted
            }
        };

        results.outcomes.push(RuleOutcome {
            rule_name: rule.name.clone(),
            status,
        });
    }

    let merged = merge_until_settled(proposals, dependencies.mergers);

    for error in merged.failed {
        mark_failed(&mut results.outcomes, error.rule_name());
        results.failed.push(error);
    }

    for contribution in contributions {
        if results.status_of(&contribution.rule_name) != Some(RuleStatus::Converted) {
            continue;
        }
        results.plugins.extend(contribution.plugins);
        results.extends.extend(contribution.extends);
        results.equivalents.push(RuleEquivalent {
            rule_name: contribution.rule_name,
            target_rules: contribution.target_rules,
        });
    }

    for (rule_name, settings) in merged.rules.iter() {
        match existing_rules.and_then(|existing| existing.get(rule_name)) {
            Some(existing) => {
                debug!(
                    "'{}' is already configured; keeping the existing value",
                    rule_name
                );
                results.conflicts.push(RuleConflict {
                    rule_name: rule_name.to_string(),
                    existing: existing.clone(),
                    proposed: settings.clone(),
                });
            }
            None => results.converted.insert(rule_name, settings.clone()),
        }
    }

    debug!(
        "Converted {} rules ({} failed, {} missing, {} conflicts)",
        results.converted_rule_count(),
        results.failed.len(),
        results.missing.len(),
        results.conflicts.len()
    );

    results
}

/// What a converted source rule adds besides its rule proposals.
struct Contribution {
    rule_name: String,
    target_rules: Vec<String>,
    plugins: Vec<String>,
    extends: Vec<String>,
}

/// Merges proposals, withdrawing every proposal of a source rule that lost a
/// merge and merging again until no merge fails.
///
/// A failed source rule contributes nothing, so its other target rules must
/// not survive either. Each source rule keeps only its first merge error.
fn merge_until_settled(proposals: Vec<ProposedRule>, mergers: &MergerRegistry) -> MergeOutcome {
    let mut failed: Vec<ConversionError> = Vec::new();

    loop {
        let remaining: Vec<ProposedRule> = proposals
            .iter()
            .filter(|p| !failed.iter().any(|e| e.rule_name() == p.source_rule))
            .cloned()
            .collect();

        let mut outcome = merge_proposals(remaining, mergers);
        if outcome.failed.is_empty() {
            outcome.failed = failed;
            return outcome;
        }

        for error in outcome.failed {
            if !failed.iter().any(|e| e.rule_name() == error.rule_name()) {
                debug!("Withdrawing every proposal of '{}'", error.rule_name());
                failed.push(error);
            }
        }
    }
}

fn mark_failed(outcomes: &mut [RuleOutcome], rule_name: &str) {
    if let Some(outcome) = outcomes
        .iter_mut()
        .find(|outcome| outcome.rule_name == rule_name)
    {
        outcome.status = RuleStatus::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConversionNotice, ConverterOutput, EslintRuleSettings, Severity};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn converters() -> ConverterRegistry {
        ConverterRegistry::new()
            .with("no-var-keyword", |_| {
                Ok(ConverterOutput::rule(ConversionNotice::new("no-var")))
            })
            .with("indent", |ctx| {
                Ok(ConverterOutput::rule(
                    ConversionNotice::new("indent").with_arguments(ctx.arguments.to_vec()),
                ))
            })
            .with("align", |ctx| {
                Ok(ConverterOutput::rule(
                    ConversionNotice::new("indent").with_arguments(ctx.arguments.to_vec()),
                ))
            })
            .with("import-blacklist", |ctx| {
                Ok(ConverterOutput::rule(
                    ConversionNotice::new("no-restricted-imports")
                        .with_arguments(ctx.arguments.to_vec()),
                )
                .with_plugin("eslint-plugin-import"))
            })
            .with("no-submodule-imports", |ctx| {
                Ok(ConverterOutput::rule(
                    ConversionNotice::new("no-restricted-imports")
                        .with_arguments(ctx.arguments.to_vec()),
                )
                .with_plugin("eslint-plugin-import")
                .with_extends("plugin:import/recommended"))
            })
            .with("prettier", |_| {
                Ok(ConverterOutput::none()
                    .with_extends("plugin:prettier/recommended")
                    .with_extends("plugin:import/recommended"))
            })
            .with("broken", |_| Err("unsupported option".to_string()))
            .with("quotemark", |ctx| {
                Ok(ConverterOutput::rule(
                    ConversionNotice::new("quotes").with_arguments(ctx.arguments.to_vec()),
                ))
            })
            .with("jsx-quotemark", |ctx| {
                Ok(ConverterOutput::rules(vec![
                    ConversionNotice::new("quotes").with_arguments(ctx.arguments.to_vec()),
                    ConversionNotice::new("jsx-quotes"),
                ])
                .with_plugin("eslint-plugin-react"))
            })
    }

    fn mergers() -> MergerRegistry {
        MergerRegistry::new()
            .with(
                "no-restricted-imports",
                |proposals: &[Vec<Value>]| -> Result<Vec<Value>, String> {
                    Ok(proposals.concat())
                },
            )
            .with(
                "quotes",
                |proposals: &[Vec<Value>]| -> Result<Vec<Value>, String> {
                    if proposals.windows(2).all(|pair| pair[0] == pair[1]) {
                        Ok(proposals[0].clone())
                    } else {
                        Err("conflicting quote styles".to_string())
                    }
                },
            )
    }

    fn run(rules: &[SourceRule], existing: Option<&Map<String, Value>>) -> ConversionResults {
        let converters = converters();
        let mergers = mergers();
        let dependencies = ConvertRulesDependencies {
            converters: &converters,
            mergers: &mergers,
        };
        convert_rules(&dependencies, rules, existing, &ConversionSettings::new())
    }

    #[test]
    fn test_converts_single_rule() {
        let results = run(&[SourceRule::new("no-var-keyword", Severity::Error)], None);

        assert_eq!(results.converted.len(), 1);
        assert_eq!(
            results.converted.get("no-var"),
            Some(&EslintRuleSettings::new(Severity::Error, vec![]))
        );
        assert!(results.failed.is_empty());
        assert!(results.missing.is_empty());
    }

    #[test]
    fn test_missing_rule() {
        let rule = SourceRule::new("custom-rule", Severity::Error);
        let results = run(&[rule.clone()], None);

        assert_eq!(results.missing, vec![rule]);
        assert!(results.converted.is_empty());
        assert_eq!(results.status_of("custom-rule"), Some(RuleStatus::Missing));
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let results = run(
            &[
                SourceRule::new("broken", Severity::Error),
                SourceRule::new("no-var-keyword", Severity::Warning),
            ],
            None,
        );

        assert_eq!(results.failed.len(), 1);
        assert_eq!(results.failed[0].rule_name(), "broken");
        assert!(results.converted.contains_key("no-var"));
    }

    #[test]
    fn test_last_wins_follows_input_order() {
        let indent = SourceRule::new("indent", Severity::Error).with_arguments(vec![json!(2)]);
        let align = SourceRule::new("align", Severity::Error).with_arguments(vec![json!(4)]);

        let forward = run(&[indent.clone(), align.clone()], None);
        assert_eq!(
            forward.converted.get("indent").unwrap().arguments,
            vec![json!(4)]
        );
        assert!(forward.failed.is_empty());

        let backward = run(&[align, indent], None);
        assert_eq!(
            backward.converted.get("indent").unwrap().arguments,
            vec![json!(2)]
        );
        assert!(backward.failed.is_empty());
    }

    #[test]
    fn test_registered_merger_is_used() {
        let results = run(
            &[
                SourceRule::new("import-blacklist", Severity::Error)
                    .with_arguments(vec![json!("lodash")]),
                SourceRule::new("no-submodule-imports", Severity::Error)
                    .with_arguments(vec![json!("rxjs/internal")]),
            ],
            None,
        );

        assert_eq!(
            results.converted.get("no-restricted-imports").unwrap().arguments,
            vec![json!("lodash"), json!("rxjs/internal")]
        );
        assert_eq!(results.plugins.as_slice(), ["eslint-plugin-import"]);
    }

    #[test]
    fn test_existing_rule_wins() {
        let existing = json!({ "no-var": "off" });
        let results = run(
            &[SourceRule::new("no-var-keyword", Severity::Error)],
            existing.as_object(),
        );

        assert!(results.converted.is_empty());
        assert_eq!(results.conflicts.len(), 1);
        assert_eq!(results.conflicts[0].rule_name, "no-var");
        assert_eq!(results.conflicts[0].existing, json!("off"));
        assert_eq!(
            results.status_of("no-var-keyword"),
            Some(RuleStatus::Converted)
        );
    }

    #[test]
    fn test_extends_keep_first_occurrence() {
        let results = run(
            &[
                SourceRule::new("no-submodule-imports", Severity::Error),
                SourceRule::new("prettier", Severity::Error),
            ],
            None,
        );

        assert_eq!(
            results.extends.as_slice(),
            ["plugin:import/recommended", "plugin:prettier/recommended"]
        );
        assert_eq!(results.equivalents_of("prettier"), Some(&[][..]));
    }

    #[test]
    fn test_unresolvable_merge_withdraws_later_rule() {
        let results = run(
            &[
                SourceRule::new("quotemark", Severity::Error)
                    .with_arguments(vec![json!("single")]),
                SourceRule::new("jsx-quotemark", Severity::Error)
                    .with_arguments(vec![json!("double")]),
            ],
            None,
        );

        assert_eq!(
            results.converted.keys().collect::<Vec<_>>(),
            vec!["quotes"]
        );
        assert_eq!(
            results.converted.get("quotes").unwrap().arguments,
            vec![json!("single")]
        );
        assert!(results.plugins.is_empty());
        assert_eq!(results.failed.len(), 1);
        assert_eq!(results.failed[0].rule_name(), "jsx-quotemark");
        assert_eq!(results.status_of("jsx-quotemark"), Some(RuleStatus::Failed));
        assert_eq!(results.equivalents_of("jsx-quotemark"), None);
        assert_eq!(results.status_of("quotemark"), Some(RuleStatus::Converted));
    }

    #[test]
    fn test_every_rule_lands_in_exactly_one_bucket() {
        let rules = vec![
            SourceRule::new("no-var-keyword", Severity::Error),
            SourceRule::new("broken", Severity::Error),
            SourceRule::new("unknown", Severity::Warning),
            SourceRule::new("prettier", Severity::Error),
            SourceRule::new("quotemark", Severity::Error).with_arguments(vec![json!("single")]),
            SourceRule::new("jsx-quotemark", Severity::Error)
                .with_arguments(vec![json!("double")]),
        ];
        let results = run(&rules, None);

        assert_eq!(results.outcomes.len(), rules.len());
        for rule in &rules {
            let in_failed = results.failed.iter().any(|e| e.rule_name() == rule.name);
            let in_missing = results.missing.iter().any(|m| m.name == rule.name);
            let in_converted = results.status_of(&rule.name) == Some(RuleStatus::Converted);
            let contributes = results.equivalents_of(&rule.name).is_some();
            assert_eq!(in_converted, contributes, "{} contributions", rule.name);

            let buckets = [in_failed, in_missing, in_converted]
                .iter()
                .filter(|&&b| b)
                .count();
            assert_eq!(buckets, 1, "{} is in {} buckets", rule.name, buckets);
        }

        for (target, _) in results.converted.iter() {
            let sources: Vec<&str> = results
                .equivalents
                .iter()
                .filter(|e| e.target_rules.iter().any(|t| t == target))
                .map(|e| e.rule_name.as_str())
                .collect();
            assert!(!sources.is_empty(), "{} has no converted source", target);
            assert!(!sources.contains(&"jsx-quotemark"));
        }
        assert!(!results.converted.contains_key("jsx-quotes"));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let rules = vec![
            SourceRule::new("import-blacklist", Severity::Error).with_arguments(vec![json!("a")]),
            SourceRule::new("indent", Severity::Error).with_arguments(vec![json!(2)]),
            SourceRule::new("prettier", Severity::Error),
            SourceRule::new("unknown", Severity::Error),
            SourceRule::new("no-submodule-imports", Severity::Error)
                .with_arguments(vec![json!("b")]),
        ];

        let first = serde_json::to_string(&run(&rules, None)).unwrap();
        let second = serde_json::to_string(&run(&rules, None)).unwrap();
        assert_eq!(first, second);
    }
}
