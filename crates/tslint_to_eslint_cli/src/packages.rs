//! Package manager detection and the npm packages a generated config needs.

use std::fmt;
use std::path::Path;

use serde_json::Value;
use tracing::debug;
use tslint_to_eslint_core::summarize::TSLINT_PLUGIN;

/// Packages every generated configuration depends on.
const BASE_PACKAGES: &[&str] = &[
    "eslint",
    "@typescript-eslint/parser",
    "@typescript-eslint/eslint-plugin",
];

/// Package managers recognized by their lock files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Detects the package manager used in `dir`, falling back to npm.
    pub fn detect(dir: &Path) -> Self {
        let manager = if dir.join("pnpm-lock.yaml").is_file() {
            Self::Pnpm
        } else if dir.join("yarn.lock").is_file() {
            Self::Yarn
        } else {
            Self::Npm
        };
        debug!("Detected package manager: {}", manager);
        manager
    }

    /// Command that installs `packages` as development dependencies.
    pub fn install_command(self, packages: &[String]) -> String {
        let prefix = match self {
            Self::Npm => "npm install --save-dev",
            Self::Pnpm => "pnpm add --save-dev",
            Self::Yarn => "yarn add --dev",
        };
        format!("{} {}", prefix, packages.join(" "))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        };
        f.write_str(name)
    }
}

/// Lists the packages the generated ESLint configuration requires.
///
/// Derived from the final `plugins` and `extends` so that entries kept from an
/// existing configuration are covered too.
pub fn required_packages(eslint_config: &Value) -> Vec<String> {
    let mut packages: Vec<String> = BASE_PACKAGES.iter().map(|p| p.to_string()).collect();

    let plugins = string_items(eslint_config.get("plugins"));
    let extends = string_items(eslint_config.get("extends"));

    let candidates = plugins
        .iter()
        .filter_map(|plugin| plugin_package(plugin))
        .chain(extends.iter().filter_map(|preset| preset_package(preset)));

    for package in candidates {
        if !packages.contains(&package) {
            packages.push(package);
        }
    }

    packages
}

fn string_items(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(item)) => vec![item.as_str()],
        _ => Vec::new(),
    }
}

fn plugin_package(plugin: &str) -> Option<String> {
    if plugin == "@typescript-eslint" {
        return None;
    }
    if plugin == TSLINT_PLUGIN {
        return Some("@typescript-eslint/eslint-plugin-tslint".to_string());
    }
    if plugin.starts_with("eslint-plugin-") || plugin.contains("/eslint-plugin") {
        return Some(plugin.to_string());
    }
    match plugin.split_once('/') {
        Some((scope, name)) => Some(format!("{}/eslint-plugin-{}", scope, name)),
        None if plugin.starts_with('@') => Some(format!("{}/eslint-plugin", plugin)),
        None => Some(format!("eslint-plugin-{}", plugin)),
    }
}

fn preset_package(preset: &str) -> Option<String> {
    if preset.starts_with("eslint:") || preset.starts_with("plugin:") || preset.starts_with('.') {
        return None;
    }
    if preset.starts_with("eslint-config-") || preset.contains("/eslint-config") {
        return Some(preset.to_string());
    }
    Some(format!("eslint-config-{}", preset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_detect_package_manager() {
        let dir = tempdir().unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Npm);

        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Yarn);

        fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_install_command() {
        let packages = vec!["eslint".to_string(), "eslint-plugin-import".to_string()];
        assert_eq!(
            PackageManager::Yarn.install_command(&packages),
            "yarn add --dev eslint eslint-plugin-import"
        );
        assert_eq!(
            PackageManager::Npm.install_command(&packages),
            "npm install --save-dev eslint eslint-plugin-import"
        );
    }

    #[test]
    fn test_required_packages() {
        let config = json!({
            "extends": ["eslint:recommended", "plugin:react/recommended", "prettier"],
            "plugins": [
                "react",
                "eslint-plugin-import",
                "@typescript-eslint",
                "@typescript-eslint/tslint"
            ]
        });

        assert_eq!(
            required_packages(&config),
            vec![
                "eslint",
                "@typescript-eslint/parser",
                "@typescript-eslint/eslint-plugin",
                "eslint-plugin-react",
                "eslint-plugin-import",
                "@typescript-eslint/eslint-plugin-tslint",
                "eslint-config-prettier",
            ]
        );
    }

    #[test]
    fn test_required_packages_minimal() {
        let config = json!({ "plugins": ["@typescript-eslint"] });
        assert_eq!(required_packages(&config), BASE_PACKAGES.to_vec());
    }
}
