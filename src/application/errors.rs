//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ExtensionId;

/// General bot errors, used as the framework error type
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Discord error: {0}")]
    Discord(#[from] poise::serenity_prelude::Error),

    #[error("Extension error: {0}")]
    Extension(#[from] ExtensionError),
}

/// Extension lifecycle errors
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Extension '{0}' could not be found")]
    NotFound(ExtensionId),

    #[error("Extension '{0}' is already loaded")]
    AlreadyLoaded(ExtensionId),

    #[error("Extension '{0}' has not been loaded")]
    NotLoaded(ExtensionId),

    #[error("Extension '{0}' is disabled in its manifest")]
    Disabled(ExtensionId),

    #[error("Extension '{0}' has no registered entry point")]
    NoEntryPoint(ExtensionId),

    #[error("Invalid manifest for '{id}'")]
    Manifest {
        id: ExtensionId,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Setup of '{id}' failed")]
    Setup {
        id: ExtensionId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Teardown of '{id}' failed")]
    Teardown {
        id: ExtensionId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to scan {}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`{}` does not exist", .0.display())]
    Missing(PathBuf),

    #[error("Could not read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize configuration")]
    Serialize(#[source] serde_json::Error),

    #[error("`{}` already exists", .0.display())]
    AlreadyExists(PathBuf),
}

/// Renders an error followed by each cause in its source chain.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str("\nCaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_includes_causes() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = ExtensionError::Setup {
            id: ExtensionId::new("ranks"),
            source: Box::new(io),
        };

        let rendered = error_chain(&err);
        assert_eq!(rendered, "Setup of 'ranks' failed\nCaused by: boom");
    }

    #[test]
    fn test_error_chain_without_source() {
        let err = ExtensionError::NotLoaded(ExtensionId::new("ranks"));
        assert_eq!(error_chain(&err), "Extension 'ranks' has not been loaded");
    }

    #[test]
    fn test_error_chain_names_each_cause_once() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cause = source.to_string();
        let err = ConfigError::Parse {
            path: PathBuf::from("config.json"),
            source,
        };

        let rendered = error_chain(&err);
        assert_eq!(rendered, format!("Could not parse `config.json`\nCaused by: {}", cause));
        assert_eq!(rendered.matches(&cause).count(), 1);
    }
}
