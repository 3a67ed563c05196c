//! Cog discovery - scans the cog directory for manifests

use std::path::{Path, PathBuf};

use crate::application::errors::ExtensionError;
use crate::domain::entities::ExtensionId;
use crate::domain::traits::ExtensionSource;
use super::manifest::MANIFEST_EXTENSION;

/// Finds cogs by walking a directory for manifest files
pub struct DirectorySource {
    directory: PathBuf,
}

impl DirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn walk(&self, dir: &Path, found: &mut Vec<ExtensionId>) -> Result<(), ExtensionError> {
        let entries = std::fs::read_dir(dir).map_err(|source| ExtensionError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip hidden files and directories
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    continue;
                }
            }

            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("Failed to stat {}: {}", path.display(), e);
                    continue;
                }
            };

            if file_type.is_dir() {
                self.walk(&path, found)?;
                continue;
            }

            // Linked directories can form cycles
            if file_type.is_symlink() && path.is_dir() {
                tracing::warn!("Not following linked directory: {}", path.display());
                continue;
            }

            if path.extension().and_then(|e| e.to_str()) != Some(MANIFEST_EXTENSION) {
                continue;
            }

            // A dot in the stem would read back as a nested identifier
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            if stem.contains('.') {
                tracing::warn!("Ignoring cog manifest with a dotted name: {}", path.display());
                continue;
            }

            let relative = path.strip_prefix(&self.directory).unwrap_or(path.as_path());
            match ExtensionId::from_relative_path(relative) {
                Some(id) if id.is_well_formed() => found.push(id),
                _ => tracing::warn!("Ignoring cog manifest with unusable name: {}", path.display()),
            }
        }

        Ok(())
    }
}

impl ExtensionSource for DirectorySource {
    fn discover(&self) -> Result<Vec<ExtensionId>, ExtensionError> {
        let mut found = Vec::new();

        if !self.directory.exists() {
            tracing::warn!("Cog directory does not exist: {}", self.directory.display());
            return Ok(found);
        }

        self.walk(&self.directory, &mut found)?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discovers_flat_and_nested_manifests() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("ranks.yaml"));
        touch(&dir.path().join("moderation").join("bans.yaml"));
        touch(&dir.path().join("README.md"));
        touch(&dir.path().join(".hidden.yaml"));
        touch(&dir.path().join("bad name.yaml"));

        let source = DirectorySource::new(dir.path());
        let mut ids = source.discover().unwrap();
        ids.sort();

        assert_eq!(
            ids,
            vec![ExtensionId::new("moderation.bans"), ExtensionId::new("ranks")]
        );
    }

    #[test]
    fn test_dotted_manifest_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("ranks.yaml"));
        touch(&dir.path().join("foo.bar.yaml"));

        let ids = DirectorySource::new(dir.path()).discover().unwrap();

        assert_eq!(ids, vec![ExtensionId::new("ranks")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_directory_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("moderation").join("bans.yaml"));
        std::os::unix::fs::symlink(dir.path(), dir.path().join("moderation").join("loop"))
            .unwrap();

        let ids = DirectorySource::new(dir.path()).discover().unwrap();

        assert_eq!(ids, vec![ExtensionId::new("moderation.bans")]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path().join("nope"));

        assert!(source.discover().unwrap().is_empty());
    }
}
