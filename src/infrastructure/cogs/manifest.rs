//! Cog manifest definition

use serde::{Deserialize, Serialize};

/// File extension of cog manifests
pub const MANIFEST_EXTENSION: &str = "yaml";

/// Cog metadata, one file per cog in the cog directory
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CogManifest {
    /// Cog description
    #[serde(default)]
    pub description: Option<String>,

    /// Disabled cogs are discovered but refuse to load
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Cog-specific settings handed to setup
    #[serde(default)]
    pub settings: serde_yaml::Value,
}

fn default_enabled() -> bool {
    true
}

impl Default for CogManifest {
    fn default() -> Self {
        Self {
            description: None,
            enabled: true,
            settings: serde_yaml::Value::Null,
        }
    }
}

impl CogManifest {
    /// Parse a manifest. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
