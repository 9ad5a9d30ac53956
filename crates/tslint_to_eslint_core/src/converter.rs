//! Per-rule conversion: the converter registry and single-rule lookup.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{ConversionSettings, Severity, SourceRule};

/// A proposed target rule produced by converting one source rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionNotice {
    /// ESLint rule name, e.g. `@typescript-eslint/indent`.
    pub rule_name: String,

    /// ESLint rule arguments (everything after the severity).
    pub rule_arguments: Vec<Value>,

    /// Explicit severity; `None` inherits the source rule's severity.
    pub severity: Option<Severity>,

    /// Human-readable notes about behavior that did not carry over.
    pub notices: Vec<String>,
}

impl ConversionNotice {
    /// Creates a notice for `rule_name` with no arguments.
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            rule_arguments: Vec::new(),
            severity: None,
            notices: Vec::new(),
        }
    }

    /// Sets all rule arguments.
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.rule_arguments = arguments;
        self
    }

    /// Appends one rule argument.
    pub fn with_argument(mut self, argument: Value) -> Self {
        self.rule_arguments.push(argument);
        self
    }

    /// Overrides the inherited severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Adds a human-readable note.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }
}

/// Everything a converter contributes for one source rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConverterOutput {
    /// Proposed target rules, possibly empty for intentional no-ops.
    pub rules: Vec<ConversionNotice>,

    /// Plugin packages required by the proposed rules.
    pub plugins: Vec<String>,

    /// Presets to extend instead of (or in addition to) discrete rules.
    pub extends: Vec<String>,
}

impl ConverterOutput {
    /// A conversion with no target equivalent that is still considered converted.
    pub fn none() -> Self {
        Self::default()
    }

    /// A conversion to a single target rule.
    pub fn rule(notice: ConversionNotice) -> Self {
        Self::rules(vec![notice])
    }

    /// A conversion fanning out to several target rules.
    pub fn rules(rules: Vec<ConversionNotice>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Declares a required plugin package.
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    /// Declares a preset to extend.
    pub fn with_extends(mut self, preset: impl Into<String>) -> Self {
        self.extends.push(preset.into());
        self
    }
}

/// Inputs handed to a converter function.
#[derive(Debug, Clone, Copy)]
pub struct ConverterContext<'a> {
    /// Source rule arguments.
    pub arguments: &'a [Value],

    /// Source rule severity.
    pub severity: Severity,

    /// Ambient settings.
    pub settings: &'a ConversionSettings,
}

impl<'a> ConverterContext<'a> {
    /// Returns whether a string flag such as `"allow-empty-catch"` is present.
    pub fn has_argument(&self, flag: &str) -> bool {
        self.arguments.iter().any(|arg| arg.as_str() == Some(flag))
    }

    /// Returns the string arguments in order, skipping everything else.
    pub fn string_arguments(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.arguments.iter().filter_map(Value::as_str)
    }

    /// Returns the first object argument, if any.
    pub fn object_argument(&self) -> Option<&'a serde_json::Map<String, Value>> {
        self.arguments.iter().find_map(Value::as_object)
    }

    /// Returns the first numeric argument, if any.
    pub fn number_argument(&self) -> Option<&'a Value> {
        self.arguments.iter().find(|arg| arg.is_number())
    }
}

/// Result of one converter invocation; `Err` carries the reason.
pub type ConverterResult = Result<ConverterOutput, String>;

type ConverterFn = Box<dyn Fn(&ConverterContext<'_>) -> ConverterResult + Send + Sync>;

/// Immutable mapping from source rule name to its converter.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, ConverterFn>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a converter, builder style.
    pub fn with<F>(mut self, rule_name: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&ConverterContext<'_>) -> ConverterResult + Send + Sync + 'static,
    {
        self.insert(rule_name, converter);
        self
    }

    /// Registers a converter.
    ///
    /// Registering the same rule twice is a programming error.
    pub fn insert<F>(&mut self, rule_name: impl Into<String>, converter: F)
    where
        F: Fn(&ConverterContext<'_>) -> ConverterResult + Send + Sync + 'static,
    {
        let rule_name = rule_name.into();
        debug_assert!(
            !self.converters.contains_key(&rule_name),
            "duplicate converter for '{}'",
            rule_name
        );
        self.converters.insert(rule_name, Box::new(converter));
    }

    /// Returns whether a converter exists for `rule_name`.
    pub fn contains(&self, rule_name: &str) -> bool {
        self.converters.contains_key(rule_name)
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Registered rule names, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.converters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn get(&self, rule_name: &str) -> Option<&ConverterFn> {
        self.converters.get(rule_name)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// A per-rule failure, kept as data in the conversion results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConversionError {
    /// The converter rejected the rule's arguments or severity.
    #[error("{rule_name} threw an error during conversion: {message}")]
    #[serde(rename_all = "camelCase")]
    ConverterFailed { rule_name: String, message: String },

    /// The proposal could not be reconciled with earlier proposals for the
    /// same target rule.
    #[error("{rule_name} could not be merged into {target_rule_name}: {message}")]
    #[serde(rename_all = "camelCase")]
    UnresolvableMerge {
        rule_name: String,
        target_rule_name: String,
        message: String,
    },
}

impl ConversionError {
    /// Creates a converter failure.
    pub fn converter_failed(rule_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConverterFailed {
            rule_name: rule_name.into(),
            message: message.into(),
        }
    }

    /// Creates a merge failure.
    pub fn unresolvable_merge(
        rule_name: impl Into<String>,
        target_rule_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnresolvableMerge {
            rule_name: rule_name.into(),
            target_rule_name: target_rule_name.into(),
            message: message.into(),
        }
    }

    /// Name of the source rule the failure is attributed to.
    pub fn rule_name(&self) -> &str {
        match self {
            Self::ConverterFailed { rule_name, .. } => rule_name,
            Self::UnresolvableMerge { rule_name, .. } => rule_name,
        }
    }
}

/// Outcome of converting one source rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConversion {
    /// The converter accepted the rule; severities are already resolved.
    Converted(ConverterOutput),
    /// The converter rejected the rule.
    Failed(ConversionError),
    /// No converter is registered.
    Missing,
}

/// Converts a single source rule through the registry.
///
/// Every returned notice has its severity resolved: notices that did not set
/// one inherit the source rule's severity.
pub fn convert_rule(
    rule: &SourceRule,
    converters: &ConverterRegistry,
    settings: &ConversionSettings,
) -> RuleConversion {
    let Some(converter) = converters.get(&rule.name) else {
        debug!("No converter for '{}'", rule.name);
        return RuleConversion::Missing;
    };

    let context = ConverterContext {
        arguments: &rule.arguments,
        severity: rule.severity,
        settings,
    };

    match converter(&context) {
        Ok(mut output) => {
            for notice in &mut output.rules {
                notice.severity.get_or_insert(rule.severity);
            }
            RuleConversion::Converted(output)
        }
        Err(message) => {
            debug!("Converter for '{}' failed: {}", rule.name, message);
            RuleConversion::Failed(ConversionError::converter_failed(&rule.name, message))
        }
    }
}
