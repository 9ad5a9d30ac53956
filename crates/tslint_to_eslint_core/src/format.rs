//! Serializes the generated configuration for the chosen output file.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::MigrateError;

/// Output file flavor, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `.json` and extension-less `.eslintrc`.
    Json,
    /// `.js` / `.cjs` CommonJS module.
    JavaScript,
    /// `.yml` / `.yaml`.
    Yaml,
}

impl OutputFormat {
    /// Determines the format from an output path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("js" | "cjs") => Self::JavaScript,
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Renders a configuration value; the result always ends with a newline.
pub fn format_output(value: &Value, format: OutputFormat) -> Result<String, MigrateError> {
    let mut output = match format {
        OutputFormat::Json => to_pretty_json(value)?,
        OutputFormat::JavaScript => format!("module.exports = {};", to_pretty_json(value)?),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| MigrateError::format(format!("Failed to write YAML: {}", e)))?,
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn to_pretty_json(value: &Value) -> Result<String, MigrateError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| MigrateError::format(format!("Failed to write JSON: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| MigrateError::format(format!("Failed to write JSON: {}", e)))
}
