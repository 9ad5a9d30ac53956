//! Conversion of TSLint `extends` presets.

use serde::Serialize;
use tracing::debug;

use crate::ConversionSettings;

const TYPESCRIPT_RECOMMENDED: &[&str] = &[
    "eslint:recommended",
    "plugin:@typescript-eslint/recommended",
    "plugin:@typescript-eslint/recommended-requiring-type-checking",
];

/// ESLint presets and plugins that replace the TSLint presets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendsConversion {
    /// ESLint presets, first occurrence wins.
    pub extends: Vec<String>,

    /// Plugin packages the presets need.
    pub plugins: Vec<String>,

    /// TSLint presets without an ESLint counterpart.
    pub missing: Vec<String>,
}

/// Maps each TSLint preset onto its ESLint presets.
pub fn convert_extends(presets: &[String], settings: &ConversionSettings) -> ExtendsConversion {
    let mut conversion = ExtendsConversion::default();

    for preset in presets {
        let (extends, plugins): (&[&str], &[&str]) = match preset.as_str() {
            "tslint:recommended" | "tslint:latest" | "tslint:all" => {
                (TYPESCRIPT_RECOMMENDED, &[])
            }
            "tslint-config-prettier" | "tslint-plugin-prettier" => (&["prettier"], &[]),
            "tslint-react" => (&["plugin:react/recommended"], &["eslint-plugin-react"]),
            "tslint-eslint-rules" => (&[], &[]),
            _ => {
                debug!("No ESLint equivalent for preset '{}'", preset);
                conversion.missing.push(preset.clone());
                continue;
            }
        };

        for &name in extends {
            if name == "prettier" && settings.prettier {
                // Added at the very end during summarization.
                continue;
            }
            push_unique(&mut conversion.extends, name);
        }
        for &plugin in plugins {
            push_unique(&mut conversion.plugins, plugin);
        }
    }

    conversion
}

fn push_unique(items: &mut Vec<String>, item: &str) {
    if !items.iter().any(|existing| existing == item) {
        items.push(item.to_string());
    }
}
