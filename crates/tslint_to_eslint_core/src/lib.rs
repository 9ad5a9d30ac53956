//! # tslint_to_eslint_core
//!
//! Rule conversion and merge engine for migrating TSLint configuration to ESLint.
//!
//! This crate provides:
//! - TSLint and existing ESLint configuration loading
//! - The converter and merger registries, with built-in entries
//! - The conversion orchestrator and merge engine
//! - ESLint configuration summarization and output formatting
//! - Editor settings conversion and comment directive rewriting
//!
//! ## Example
//!
//! ```rust,ignore
//! use tslint_to_eslint_core::{
//!     ConversionSettings, ConvertRulesDependencies, TslintConfig, builtin_converters,
//!     builtin_mergers, convert_config, summarize_config,
//! };
//!
//! let converters = builtin_converters();
//! let mergers = builtin_mergers();
//! let dependencies = ConvertRulesDependencies { converters: &converters, mergers: &mergers };
//!
//! let tslint = TslintConfig::from_file("tslint.json")?;
//! let settings = ConversionSettings::new();
//! let conversion = convert_config(&dependencies, &tslint, None, &settings);
//! let eslint_config = summarize_config(&conversion, None, &settings);
//! ```

pub mod comments;
mod convert_rules;
pub mod converter;
pub mod converters;
pub mod editor;
mod error;
mod eslint;
pub mod extends;
pub mod format;
pub mod merge;
pub mod merger;
pub mod mergers;
mod migration;
mod results;
mod rule;
mod settings;
pub mod summarize;
mod tslint;

pub use comments::{CommentConversion, convert_comments};
pub use convert_rules::{ConvertRulesDependencies, convert_rules};
pub use converter::{
    ConversionError, ConversionNotice, ConverterContext, ConverterOutput, ConverterRegistry,
    ConverterResult, RuleConversion, convert_rule,
};
pub use converters::builtin_converters;
pub use editor::{
    EditorSettingRegistry, EditorSettingsResults, apply_editor_settings,
    builtin_editor_converters, convert_editor_settings, parse_editor_settings,
};
pub use error::MigrateError;
pub use eslint::EslintConfig;
pub use format::{OutputFormat, format_output};
pub use merger::{MergerRegistry, RuleMerger};
pub use mergers::builtin_mergers;
pub use migration::{ConfigConversion, convert_config};
pub use results::{
    ConversionResults, EslintRuleSettings, OrderedSet, RuleConflict, RuleEquivalent, RuleMap,
    RuleOutcome, RuleStatus,
};
pub use rule::{Severity, SourceRule};
pub use settings::ConversionSettings;
pub use summarize::summarize_config;
pub use tslint::TslintConfig;
