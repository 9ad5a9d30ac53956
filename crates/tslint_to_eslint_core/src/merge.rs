//! Merge engine: collapses proposals for the same target rule into one entry.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::merger::{MergerRegistry, escalate_severity};
use crate::{ConversionError, EslintRuleSettings, RuleMap, Severity};

/// A target rule proposal attributed to the source rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedRule {
    /// Source rule name.
    pub source_rule: String,

    /// Target rule name.
    pub rule_name: String,

    /// Proposed arguments.
    pub arguments: Vec<Value>,

    /// Resolved severity.
    pub severity: Severity,

    /// Converter notes.
    pub notices: Vec<String>,
}

/// Result of merging all proposals.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// One entry per distinct target rule, in first-seen order.
    pub rules: RuleMap,

    /// Proposals that could not be reconciled.
    pub failed: Vec<ConversionError>,
}

/// Groups proposals by target rule and reconciles each group.
///
/// - A single proposal is used as-is.
/// - Several proposals go through the registered merger, folded in source
///   order. A proposal the merger rejects against the ones accepted so far is
///   dropped and reported; later proposals keep merging with the accepted set.
/// - Several proposals without a merger: the last one wins.
pub fn merge_proposals(
    proposals: Vec<ProposedRule>,
    mergers: &MergerRegistry,
) -> MergeOutcome {
    let mut groups: Vec<(String, Vec<ProposedRule>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for proposal in proposals {
        match positions.get(&proposal.rule_name) {
            Some(&position) => groups[position].1.push(proposal),
            None => {
                positions.insert(proposal.rule_name.clone(), groups.len());
                groups.push((proposal.rule_name.clone(), vec![proposal]));
            }
        }
    }

    let mut outcome = MergeOutcome::default();
    for (rule_name, group) in groups {
        let settings = merge_group(&rule_name, group, mergers, &mut outcome.failed);
        outcome.rules.insert(rule_name, settings);
    }
    outcome
}

fn merge_group(
    rule_name: &str,
    mut group: Vec<ProposedRule>,
    mergers: &MergerRegistry,
    failed: &mut Vec<ConversionError>,
) -> EslintRuleSettings {
    if group.len() == 1 {
        let proposal = group.remove(0);
        return EslintRuleSettings {
            severity: proposal.severity,
            arguments: proposal.arguments,
            notices: proposal.notices,
        };
    }

    let (severity, arguments) = match mergers.get(rule_name) {
        None => {
            debug!(
                "{} proposals for '{}' without a merger; keeping the last",
                group.len(),
                rule_name
            );
            let severities: Vec<Severity> = group.iter().map(|p| p.severity).collect();
            let arguments = group
                .last()
                .map(|p| p.arguments.clone())
                .unwrap_or_default();
            (escalate_severity(&severities), arguments)
        }
        Some(merger) => {
            let mut proposals = group.into_iter();
            let Some(first) = proposals.next() else {
                return EslintRuleSettings::new(Severity::Off, Vec::new());
            };
            let mut arguments = first.arguments.clone();
            let mut accepted = vec![first];

            for next in proposals {
                let proposed: Vec<Vec<Value>> = accepted
                    .iter()
                    .chain(std::iter::once(&next))
                    .map(|p| p.arguments.clone())
                    .collect();
                match merger.merge_arguments(&proposed) {
                    Ok(merged) => {
                        arguments = merged;
                        accepted.push(next);
                    }
                    Err(message) => {
                        debug!(
                            "Dropping proposal from '{}' for '{}': {}",
                            next.source_rule, rule_name, message
                        );
                        failed.push(ConversionError::unresolvable_merge(
                            next.source_rule,
                            rule_name,
                            message,
                        ));
                    }
                }
            }

            group = accepted;
            let severities: Vec<Severity> = group.iter().map(|p| p.severity).collect();
            (merger.merge_severity(&severities), arguments)
        }
    };

    let mut notices: Vec<String> = Vec::new();
    for notice in group.into_iter().flat_map(|p| p.notices) {
        if !notices.contains(&notice) {
            notices.push(notice);
        }
    }

    EslintRuleSettings {
        severity,
        arguments,
        notices,
    }
}
