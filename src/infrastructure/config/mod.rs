//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Per-guild settings keyed by guild ID
    pub guilds: HashMap<String, GuildConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuildConfig {
    pub transparency_channel: u64,
    pub membership_channel: u64,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a sample configuration, refusing to overwrite an existing file
    pub fn write_sample(path: impl Into<PathBuf>) -> Result<PathBuf, ConfigError> {
        let path = path.into();
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }

        let content =
            serde_json::to_string_pretty(&Config::sample()).map_err(ConfigError::Serialize)?;

        std::fs::write(&path, content).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn sample() -> Self {
        let mut guilds = HashMap::new();
        guilds.insert(
            "000000000000000000".to_string(),
            GuildConfig {
                transparency_channel: 0,
                membership_channel: 0,
            },
        );
        Self { guilds }
    }

    pub fn guild(&self, guild_id: u64) -> Option<&GuildConfig> {
        self.guilds.get(&guild_id.to_string())
    }

    /// Channel for moderation actions. A zero id counts as unset.
    pub fn transparency_channel(&self, guild_id: u64) -> Option<u64> {
        self.guild(guild_id)
            .map(|g| g.transparency_channel)
            .filter(|id| *id != 0)
    }

    /// Channel for joins and leaves. A zero id counts as unset.
    pub fn membership_channel(&self, guild_id: u64) -> Option<u64> {
        self.guild(guild_id)
            .map(|g| g.membership_channel)
            .filter(|id| *id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "guilds": {
            "123": { "transparency_channel": 10, "membership_channel": 20 }
        }
    }"#;

    #[test]
    fn test_load_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, VALID).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.transparency_channel(123), Some(10));
        assert_eq!(config.membership_channel(123), Some(20));
        assert_eq!(config.transparency_channel(456), None);
    }

    #[test]
    fn test_zero_channel_is_unset() {
        let config: Config = serde_json::from_str(
            r#"{ "guilds": { "5": { "transparency_channel": 0, "membership_channel": 30 } } }"#,
        )
        .unwrap();

        assert_eq!(config.transparency_channel(5), None);
        assert_eq!(config.membership_channel(5), Some(30));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Missing(p) if p == path));
    }

    #[test]
    fn test_load_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Could not parse"));
    }

    #[test]
    fn test_load_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "guilds": { "1": { "transparency_channel": "x" } } }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_write_sample_round_trips_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::write_sample(&path).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.guilds.len(), 1);

        assert!(matches!(
            Config::write_sample(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
