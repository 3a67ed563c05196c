//! Cog host - instantiates cogs from the catalog and keeps the live ones

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::ExtensionError;
use crate::cogs::{Cog, CogCatalog, CogContext};
use crate::domain::entities::ExtensionId;
use crate::domain::traits::ExtensionHost;
use crate::infrastructure::config::Config;
use super::manifest::{CogManifest, MANIFEST_EXTENSION};

/// A cog that has completed setup
struct LiveCog {
    cog: Box<dyn Cog>,
    context: CogContext,
}

/// Hosts cogs listed in a manifest directory and built from a catalog
pub struct CogHost {
    directory: PathBuf,
    catalog: CogCatalog,
    config: Arc<Config>,
    live: HashMap<ExtensionId, LiveCog>,
}

impl CogHost {
    pub fn new(directory: impl Into<PathBuf>, catalog: CogCatalog, config: Arc<Config>) -> Self {
        Self {
            directory: directory.into(),
            catalog,
            config,
            live: HashMap::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn manifest_path(&self, id: &ExtensionId) -> PathBuf {
        self.directory
            .join(id.to_relative_path())
            .with_extension(MANIFEST_EXTENSION)
    }

    /// Build a fresh instance and run its setup
    async fn instantiate(&self, id: &ExtensionId) -> Result<LiveCog, ExtensionError> {
        if !id.is_well_formed() {
            return Err(ExtensionError::NotFound(id.clone()));
        }

        let path = self.manifest_path(id);
        if !path.exists() {
            return Err(ExtensionError::NotFound(id.clone()));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let manifest = CogManifest::parse(&content).map_err(|source| ExtensionError::Manifest {
            id: id.clone(),
            source,
        })?;

        if !manifest.enabled {
            return Err(ExtensionError::Disabled(id.clone()));
        }

        let factory = self
            .catalog
            .get(id)
            .ok_or_else(|| ExtensionError::NoEntryPoint(id.clone()))?;

        let mut cog = factory();
        let description = manifest
            .description
            .unwrap_or_else(|| cog.description().to_string());
        let context = CogContext::new(self.config.clone(), manifest.settings);
        cog.setup(&context)
            .await
            .map_err(|source| ExtensionError::Setup {
                id: id.clone(),
                source,
            })?;

        tracing::debug!("Set up cog {}: {}", id, description);
        Ok(LiveCog { cog, context })
    }
}

#[async_trait]
impl ExtensionHost for CogHost {
    async fn load_extension(&mut self, id: &ExtensionId) -> Result<(), ExtensionError> {
        if self.live.contains_key(id) {
            return Err(ExtensionError::AlreadyLoaded(id.clone()));
        }

        let live = self.instantiate(id).await?;
        self.live.insert(id.clone(), live);
        Ok(())
    }

    async fn reload_extension(&mut self, id: &ExtensionId) -> Result<(), ExtensionError> {
        let mut old = self
            .live
            .remove(id)
            .ok_or_else(|| ExtensionError::NotLoaded(id.clone()))?;

        if let Err(e) = old.cog.teardown().await {
            tracing::warn!("Teardown of {} failed during reload: {}", id, e);
        }

        let err = match self.instantiate(id).await {
            Ok(live) => {
                self.live.insert(id.clone(), live);
                return Ok(());
            }
            Err(e) => e,
        };

        // Roll back to the previous instance
        match old.cog.setup(&old.context).await {
            Ok(()) => {
                tracing::warn!("Reload of {} failed, previous instance restored", id);
                self.live.insert(id.clone(), old);
            }
            Err(e) => {
                tracing::error!("Rollback of {} failed, cog is unloaded: {}", id, e);
            }
        }

        Err(err)
    }

    async fn unload_extension(&mut self, id: &ExtensionId) -> Result<(), ExtensionError> {
        let mut live = self
            .live
            .remove(id)
            .ok_or_else(|| ExtensionError::NotLoaded(id.clone()))?;

        live.cog
            .teardown()
            .await
            .map_err(|source| ExtensionError::Teardown {
                id: id.clone(),
                source,
            })
    }

    fn is_extension_registered(&self, id: &ExtensionId) -> bool {
        self.live.contains_key(id)
    }
}
