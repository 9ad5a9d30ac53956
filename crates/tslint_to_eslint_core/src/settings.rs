//! Ambient conversion settings.

use serde::{Deserialize, Serialize};

/// Settings visible to every converter.
///
/// These come from the command line and adjust how individual rules are
/// translated; they never change which rules are looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSettings {
    /// Formatting is delegated to Prettier, so purely stylistic rules are
    /// converted to nothing.
    #[serde(default)]
    pub prettier: bool,

    /// The generated configuration enables type-aware linting.
    #[serde(default)]
    pub type_checked: bool,
}

impl ConversionSettings {
    /// Creates settings with every flag disabled.
    pub fn new() -> Self {
        Self::default()
    }
}
