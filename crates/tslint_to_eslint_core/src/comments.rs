//! Rewrites `tslint:` comment directives into their `eslint-` equivalents.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use crate::converter::{ConverterRegistry, RuleConversion, convert_rule};
use crate::{ConversionSettings, Severity, SourceRule};

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?P<open>//[ \t]*|/\*[ \t]*)tslint:(?P<directive>disable-next-line|disable-line|disable|enable)(?::(?P<rules>[^\n*]*))?",
    )
    .expect("Invalid tslint directive pattern")
});

/// Outcome of rewriting one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConversion {
    /// Rewritten file content.
    pub content: String,

    /// Number of directives rewritten.
    pub converted: usize,

    /// Directives left as they were because none of their rules converted.
    pub unchanged: usize,

    /// TSLint rule names dropped from directive lists, first occurrence only.
    pub dropped_rules: Vec<String>,
}

impl CommentConversion {
    /// Returns whether the content differs from the input.
    pub fn is_changed(&self) -> bool {
        self.converted > 0
    }
}

/// Rewrites every TSLint directive in `content`.
///
/// Rule lists are translated through the converter registry. A directive
/// whose rules all fail to translate is left unchanged rather than widened to
/// every rule.
pub fn convert_comments(
    content: &str,
    converters: &ConverterRegistry,
    settings: &ConversionSettings,
) -> CommentConversion {
    let mut conversion = CommentConversion::default();

    let rewritten = DIRECTIVE.replace_all(content, |caps: &Captures<'_>| {
        let original = caps[0].to_string();
        let open = &caps["open"];
        let directive = &caps["directive"];

        let Some(raw_rules) = caps.name("rules").map(|m| m.as_str()) else {
            conversion.converted += 1;
            return format!("{}eslint-{}", open, directive);
        };

        let trimmed = raw_rules.trim_end();
        let trailing = &raw_rules[trimmed.len()..];
        let source_rules: Vec<&str> = trimmed.split_whitespace().collect();

        let mut target_rules: Vec<String> = Vec::new();
        for source_rule in &source_rules {
            let targets = equivalent_rules(source_rule, converters, settings);
            if targets.is_empty() {
                if !conversion.dropped_rules.iter().any(|r| r == source_rule) {
                    conversion.dropped_rules.push(source_rule.to_string());
                }
                continue;
            }
            for target in targets {
                if !target_rules.contains(&target) {
                    target_rules.push(target);
                }
            }
        }

        if target_rules.is_empty() && !source_rules.is_empty() {
            debug!("Leaving '{}' unchanged: no rule converted", original.trim());
            conversion.unchanged += 1;
            return original;
        }

        conversion.converted += 1;
        if target_rules.is_empty() {
            format!("{}eslint-{}{}", open, directive, trailing)
        } else {
            format!(
                "{}eslint-{} {}{}",
                open,
                directive,
                target_rules.join(", "),
                trailing
            )
        }
    });

    conversion.content = rewritten.into_owned();
    conversion
}

fn equivalent_rules(
    rule_name: &str,
    converters: &ConverterRegistry,
    settings: &ConversionSettings,
) -> Vec<String> {
    let rule = SourceRule::new(rule_name, Severity::Error);
    match convert_rule(&rule, converters, settings) {
        RuleConversion::Converted(output) => output
            .rules
            .into_iter()
            .map(|notice| notice.rule_name)
            .collect(),
        RuleConversion::Failed(_) | RuleConversion::Missing => Vec::new(),
    }
}
