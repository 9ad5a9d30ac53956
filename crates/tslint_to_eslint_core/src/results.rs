//! Conversion results and the ordered collections they are built from.

use std::collections::{HashMap, HashSet};

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{ConversionError, Severity, SourceRule};

/// Final settings for one target rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EslintRuleSettings {
    /// Merged severity.
    pub severity: Severity,

    /// Merged arguments (everything after the severity).
    pub arguments: Vec<Value>,

    /// Notes collected from every contributing converter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

impl EslintRuleSettings {
    /// Creates settings without notices.
    pub fn new(severity: Severity, arguments: Vec<Value>) -> Self {
        Self {
            severity,
            arguments,
            notices: Vec::new(),
        }
    }

    /// The value written into an ESLint `rules` object:
    /// `"error"` or `["error", ...arguments]`.
    pub fn to_eslint_value(&self) -> Value {
        let severity = Value::String(self.severity.as_eslint_str().to_string());
        if self.arguments.is_empty() {
            return severity;
        }

        let mut value = Vec::with_capacity(self.arguments.len() + 1);
        value.push(severity);
        value.extend(self.arguments.iter().cloned());
        Value::Array(value)
    }
}

/// Insertion-ordered map from target rule name to its settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMap {
    entries: Vec<(String, EslintRuleSettings)>,
    index: HashMap<String, usize>,
}

impl RuleMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a rule; a replaced rule keeps its position.
    pub fn insert(&mut self, rule_name: impl Into<String>, settings: EslintRuleSettings) {
        let rule_name = rule_name.into();
        match self.index.get(&rule_name) {
            Some(&position) => self.entries[position].1 = settings,
            None => {
                self.index.insert(rule_name.clone(), self.entries.len());
                self.entries.push((rule_name, settings));
            }
        }
    }

    /// Looks up a rule.
    pub fn get(&self, rule_name: &str) -> Option<&EslintRuleSettings> {
        self.index
            .get(rule_name)
            .map(|&position| &self.entries[position].1)
    }

    /// Returns whether a rule is present.
    pub fn contains_key(&self, rule_name: &str) -> bool {
        self.index.contains_key(rule_name)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EslintRuleSettings)> {
        self.entries
            .iter()
            .map(|(name, settings)| (name.as_str(), settings))
    }

    /// Rule names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RuleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, settings) in &self.entries {
            map.serialize_entry(name, settings)?;
        }
        map.end()
    }
}

/// De-duplicated sequence where the first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` unless already present. Returns whether it was added.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    /// Returns whether `item` is present.
    pub fn contains(&self, item: &str) -> bool {
        self.seen.contains(item)
    }

    /// Iterates in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items as a slice, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for OrderedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl Serialize for OrderedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// A target rule that the existing configuration already defines.
///
/// The converted proposal is dropped and the existing value is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConflict {
    /// Target rule name.
    pub rule_name: String,

    /// Value found in the existing configuration.
    pub existing: Value,

    /// The dropped proposal.
    pub proposed: EslintRuleSettings,
}

/// Which bucket a source rule ended up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleStatus {
    /// Contributed to `converted` (possibly with zero target rules).
    Converted,
    /// Listed in `failed`.
    Failed,
    /// Listed in `missing`.
    Missing,
}

/// Classification of one source rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOutcome {
    /// Source rule name.
    pub rule_name: String,

    /// Bucket.
    pub status: RuleStatus,
}

/// Target rules a source rule was translated into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEquivalent {
    /// Source rule name.
    pub rule_name: String,

    /// Target rule names, in the order the converter produced them.
    pub target_rules: Vec<String>,
}

/// Aggregate output of converting a full rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResults {
    /// Final target rules in first-seen order.
    pub converted: RuleMap,

    /// Per-rule failures, in processing order.
    pub failed: Vec<ConversionError>,

    /// Source rules without a converter, in input order.
    pub missing: Vec<SourceRule>,

    /// Presets to extend, first occurrence wins.
    pub extends: OrderedSet,

    /// Required plugin packages.
    pub plugins: OrderedSet,

    /// Proposals dropped in favor of the existing configuration.
    pub conflicts: Vec<RuleConflict>,

    /// Source-to-target rule name mapping for converted rules.
    pub equivalents: Vec<RuleEquivalent>,

    /// One entry per source rule, in input order.
    pub outcomes: Vec<RuleOutcome>,
}

impl ConversionResults {
    /// Creates empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the target rules a source rule was converted into.
    pub fn equivalents_of(&self, rule_name: &str) -> Option<&[String]> {
        self.equivalents
            .iter()
            .find(|equivalent| equivalent.rule_name == rule_name)
            .map(|equivalent| equivalent.target_rules.as_slice())
    }

    /// Returns the bucket a source rule was classified into.
    pub fn status_of(&self, rule_name: &str) -> Option<RuleStatus> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.rule_name == rule_name)
            .map(|outcome| outcome.status)
    }

    /// Number of source rules that converted successfully.
    pub fn converted_rule_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == RuleStatus::Converted)
            .count()
    }

    /// Returns whether any rule failed to convert or merge.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_rule_map_replace_keeps_position() {
        let mut map = RuleMap::new();
        map.insert("a", EslintRuleSettings::new(Severity::Error, vec![]));
        map.insert("b", EslintRuleSettings::new(Severity::Error, vec![]));
        map.insert("a", EslintRuleSettings::new(Severity::Warning, vec![json!(2)]));

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a").unwrap().severity, Severity::Warning);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_rule_map_serializes_in_order() {
        let mut map = RuleMap::new();
        map.insert("z-rule", EslintRuleSettings::new(Severity::Error, vec![]));
        map.insert("a-rule", EslintRuleSettings::new(Severity::Off, vec![]));

        let serialized = serde_json::to_string(&map).unwrap();
        assert!(serialized.find("z-rule").unwrap() < serialized.find("a-rule").unwrap());
    }

    #[test]
    fn test_ordered_set_first_occurrence_wins() {
        let set: OrderedSet = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert!(set.contains("c"));
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["b", "a", "c"]));
    }

    #[test]
    fn test_to_eslint_value() {
        assert_eq!(
            EslintRuleSettings::new(Severity::Error, vec![]).to_eslint_value(),
            json!("error")
        );
        assert_eq!(
            EslintRuleSettings::new(
                Severity::Warning,
                vec![json!("single"), json!({ "avoidEscape": true })]
            )
            .to_eslint_value(),
            json!(["warn", "single", { "avoidEscape": true }])
        );
    }
}
