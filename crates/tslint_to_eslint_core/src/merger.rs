//! Merger registry: reconciles several proposals for the same target rule.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::Severity;

/// Resolves the arguments proposed for one target rule by several source rules.
pub trait RuleMerger: Send + Sync {
    /// Merges argument lists given in source-input order.
    ///
    /// Returns `Err` with a reason when the proposals cannot be reconciled.
    fn merge_arguments(&self, proposals: &[Vec<Value>]) -> Result<Vec<Value>, String>;

    /// Merges severities given in source-input order.
    ///
    /// Any `error` escalates the result to `error`; otherwise the last
    /// proposal wins.
    fn merge_severity(&self, severities: &[Severity]) -> Severity {
        escalate_severity(severities)
    }
}

impl<F> RuleMerger for F
where
    F: Fn(&[Vec<Value>]) -> Result<Vec<Value>, String> + Send + Sync,
{
    fn merge_arguments(&self, proposals: &[Vec<Value>]) -> Result<Vec<Value>, String> {
        self(proposals)
    }
}

/// Default severity policy shared by mergers and the last-wins fallback.
pub fn escalate_severity(severities: &[Severity]) -> Severity {
    if severities.contains(&Severity::Error) {
        Severity::Error
    } else {
        severities.last().copied().unwrap_or_default()
    }
}

/// Immutable mapping from target rule name to its merger.
#[derive(Default)]
pub struct MergerRegistry {
    mergers: HashMap<String, Box<dyn RuleMerger>>,
}

impl MergerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a merger, builder style.
    pub fn with(mut self, rule_name: impl Into<String>, merger: impl RuleMerger + 'static) -> Self {
        self.insert(rule_name, merger);
        self
    }

    /// Registers a merger.
    pub fn insert(&mut self, rule_name: impl Into<String>, merger: impl RuleMerger + 'static) {
        let rule_name = rule_name.into();
        debug_assert!(
            !self.mergers.contains_key(&rule_name),
            "duplicate merger for '{}'",
            rule_name
        );
        self.mergers.insert(rule_name, Box::new(merger));
    }

    /// Looks up the merger for a target rule.
    pub fn get(&self, rule_name: &str) -> Option<&dyn RuleMerger> {
        self.mergers.get(rule_name).map(|merger| &**merger)
    }

    /// Number of registered mergers.
    pub fn len(&self) -> usize {
        self.mergers.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.mergers.is_empty()
    }

    /// Registered target rule names, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.mergers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for MergerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergerRegistry")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::any_error(&[Severity::Warning, Severity::Error, Severity::Off], Severity::Error)]
    #[case::last_wins(&[Severity::Warning, Severity::Off], Severity::Off)]
    #[case::single(&[Severity::Warning], Severity::Warning)]
    #[case::empty(&[], Severity::Error)]
    fn test_escalate_severity(#[case] severities: &[Severity], #[case] expected: Severity) {
        assert_eq!(escalate_severity(severities), expected);
    }

    #[test]
    fn test_closure_merger() {
        let registry = MergerRegistry::new().with(
            "no-restricted-imports",
            |proposals: &[Vec<Value>]| -> Result<Vec<Value>, String> { Ok(proposals.concat()) },
        );

        let merger = registry.get("no-restricted-imports").unwrap();
        let merged = merger
            .merge_arguments(&[vec![json!("lodash")], vec![json!("moment")]])
            .unwrap();
        assert_eq!(merged, vec![json!("lodash"), json!("moment")]);
        assert!(registry.get("indent").is_none());
    }
}
