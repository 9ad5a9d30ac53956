//! Migration error types.

use thiserror::Error;

/// Errors that stop a migration step from producing any output.
///
/// Per-rule problems (unknown rules, rejected arguments, merge conflicts) are
/// not represented here; they are collected as [`crate::ConversionError`]
/// values inside the conversion results.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid glob pattern.
    #[error("Glob error: {0}")]
    Glob(String),

    /// Output formatting error.
    #[error("Format error: {0}")]
    Format(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MigrateError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a glob error.
    pub fn glob(message: impl Into<String>) -> Self {
        Self::Glob(message.into())
    }

    /// Creates a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}
