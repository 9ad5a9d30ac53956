//! Source rule model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::MigrateError;

/// Severity shared by source rules and converted target rules.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    #[serde(alias = "none")]
    Off,
    /// Violations are reported as warnings.
    #[serde(rename = "warn", alias = "warning")]
    Warning,
    /// Violations are reported as errors.
    #[default]
    Error,
}

impl Severity {
    /// Parses a severity string as written in TSLint configuration files.
    ///
    /// Returns `None` for `"default"` and unknown values so the caller can
    /// fall back to the configured default severity.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }

    /// The severity keyword ESLint expects.
    pub fn as_eslint_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

/// A rule as configured in the source TSLint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRule {
    /// TSLint rule name, e.g. `no-var-keyword`.
    pub name: String,

    /// Positional rule arguments, opaque to the engine.
    #[serde(default)]
    pub arguments: Vec<Value>,

    /// Configured severity.
    #[serde(default)]
    pub severity: Severity,
}

impl SourceRule {
    /// Creates a rule with no arguments.
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            severity,
        }
    }

    /// Sets the rule arguments.
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Normalizes one entry of a TSLint `rules` object.
    ///
    /// Accepted shapes:
    /// - `true` / `false`
    /// - `[enabled, ...arguments]` (an array without a leading boolean is
    ///   treated as enabled arguments)
    /// - `{ "severity": "...", "options": ... }`
    /// - `null` (disabled)
    pub fn from_raw(
        name: impl Into<String>,
        value: &Value,
        default_severity: Severity,
    ) -> Result<Self, MigrateError> {
        let name = name.into();

        let rule = match value {
            Value::Null => Self::new(name, Severity::Off),
            Value::Bool(enabled) => Self::new(name, enabled_severity(*enabled, default_severity)),
            Value::Array(items) => match items.split_first() {
                Some((Value::Bool(enabled), rest)) => {
                    Self::new(name, enabled_severity(*enabled, default_severity))
                        .with_arguments(rest.to_vec())
                }
                _ => Self::new(name, default_severity).with_arguments(items.clone()),
            },
            Value::Object(object) => {
                let severity = match object.get("severity") {
                    None => default_severity,
                    Some(Value::String(s)) => Severity::parse(s).unwrap_or(default_severity),
                    Some(other) => {
                        return Err(MigrateError::config(format!(
                            "Invalid severity for rule '{}': {}",
                            name, other
                        )));
                    }
                };
                let arguments = match object.get("options") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(options)) => options.clone(),
                    Some(option) => vec![option.clone()],
                };
                Self::new(name, severity).with_arguments(arguments)
            }
            other => {
                return Err(MigrateError::config(format!(
                    "Invalid value for rule '{}': {}",
                    name, other
                )));
            }
        };

        Ok(rule)
    }
}

fn enabled_severity(enabled: bool, default_severity: Severity) -> Severity {
    if enabled {
        default_severity
    } else {
        Severity::Off
    }
}
