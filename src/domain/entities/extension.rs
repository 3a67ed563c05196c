use std::fmt;
use std::path::{Component, Path};

use chrono::{DateTime, Utc};

use crate::application::errors::ExtensionError;

/// Identifier of a loadable extension, e.g. `ranks` or `moderation.bans`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtensionId(String);

impl ExtensionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier from a path relative to the extension directory.
    ///
    /// The file extension is stripped and path components are joined with
    /// dots, so `moderation/bans.yaml` becomes `moderation.bans`.
    pub fn from_relative_path(path: impl AsRef<Path>) -> Option<Self> {
        let stem = path.as_ref().with_extension("");
        let parts: Vec<&str> = stem
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            return None;
        }
        Some(Self(parts.join(".")))
    }

    /// Dot-separated segments of ASCII alphanumerics, `_` or `-`
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.split('.').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            })
    }

    /// Relative manifest path for this identifier, without file extension
    pub fn to_relative_path(&self) -> std::path::PathBuf {
        self.0.split('.').collect()
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExtensionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Registry entry for an active extension
#[derive(Debug, Clone)]
pub struct ExtensionRecord {
    pub loaded_at: DateTime<Utc>,
    pub reloads: u32,
}

impl ExtensionRecord {
    pub fn new() -> Self {
        Self {
            loaded_at: Utc::now(),
            reloads: 0,
        }
    }
}

impl Default for ExtensionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a single load or reload attempt
#[derive(Debug)]
pub struct LoadResult {
    pub id: ExtensionId,
    pub outcome: Result<(), ExtensionError>,
}

impl LoadResult {
    pub fn success(id: ExtensionId) -> Self {
        Self { id, outcome: Ok(()) }
    }

    pub fn failure(id: ExtensionId, error: ExtensionError) -> Self {
        Self {
            id,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&ExtensionError> {
        self.outcome.as_ref().err()
    }
}

/// Outcome of an unload attempt
#[derive(Debug)]
pub enum UnloadOutcome {
    Unloaded,
    NotLoaded,
    Failed(ExtensionError),
}
