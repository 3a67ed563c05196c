//! Extension lifecycle manager - discovery, load/reload/unload and status

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::application::errors::{error_chain, ExtensionError};
use crate::domain::entities::{ExtensionId, ExtensionRecord, LoadResult, UnloadOutcome};
use crate::domain::traits::{ExtensionHost, ExtensionSource};

/// Active extensions, keyed by identifier. Absence means unloaded.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    entries: HashMap<ExtensionId, ExtensionRecord>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ExtensionId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &ExtensionId) -> Option<&ExtensionRecord> {
        self.entries.get(id)
    }

    /// Mark an extension active, counting a reload if it already was
    fn mark_loaded(&mut self, id: &ExtensionId) {
        match self.entries.get_mut(id) {
            Some(record) => record.reloads += 1,
            None => {
                self.entries.insert(id.clone(), ExtensionRecord::new());
            }
        }
    }

    fn remove(&mut self, id: &ExtensionId) -> Option<ExtensionRecord> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the extension registry and drives the host through load, reload
/// and unload. Failures are returned as values so a batch always completes.
///
/// Operations take `&mut self`; callers that share a manager serialize
/// access (the Discord adapter keeps it behind a `tokio::sync::Mutex`).
pub struct ExtensionManager<H: ExtensionHost> {
    host: H,
    source: Box<dyn ExtensionSource>,
    registry: ExtensionRegistry,
}

impl<H: ExtensionHost> ExtensionManager<H> {
    pub fn new(host: H, source: Box<dyn ExtensionSource>) -> Self {
        Self {
            host,
            source,
            registry: ExtensionRegistry::new(),
        }
    }

    /// All available identifiers, sorted and deduplicated
    pub fn discover(&self) -> Result<Vec<ExtensionId>, ExtensionError> {
        let mut ids = self.source.discover()?;
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    pub fn is_loaded(&self, id: &ExtensionId) -> bool {
        self.registry.contains(id)
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Load an extension, or reload it if it is already active
    pub async fn load_one(&mut self, id: &ExtensionId) -> LoadResult {
        let reloading = self.is_loaded(id);
        let attempt = if reloading {
            self.host.reload_extension(id).await
        } else {
            self.host.load_extension(id).await
        };

        match attempt {
            Ok(()) => {
                self.registry.mark_loaded(id);
                if reloading {
                    info!("Reloaded extension: {}", id);
                } else {
                    info!("Loaded extension: {}", id);
                }
                LoadResult::success(id.clone())
            }
            Err(e) => {
                error!("Failed to load {}: {}", id, error_chain(&e));
                self.sync_with_host(id);
                LoadResult::failure(id.clone(), e)
            }
        }
    }

    /// Load each identifier in order, collecting every result
    pub async fn load_many(&mut self, ids: &[ExtensionId]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push(self.load_one(id).await);
        }
        results
    }

    pub async fn unload_one(&mut self, id: &ExtensionId) -> UnloadOutcome {
        if !self.is_loaded(id) {
            return UnloadOutcome::NotLoaded;
        }

        match self.host.unload_extension(id).await {
            Ok(()) => {
                if let Some(record) = self.registry.remove(id) {
                    info!(
                        "Unloaded extension: {} (loaded {}, {} reloads)",
                        id,
                        record.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        record.reloads
                    );
                }
                UnloadOutcome::Unloaded
            }
            Err(e) => {
                error!("Failed to unload {}: {}", id, error_chain(&e));
                self.sync_with_host(id);
                UnloadOutcome::Failed(e)
            }
        }
    }

    /// Discover everything and (re)load it
    pub async fn reload_all(&mut self) -> Result<Vec<LoadResult>, ExtensionError> {
        let ids = self.discover()?;
        let results = self.load_many(&ids).await;

        let failed = results.iter().filter(|r| !r.is_success()).count();
        if failed > 0 {
            warn!(
                "{} of {} extensions failed to load, {} active",
                failed,
                results.len(),
                self.registry.len()
            );
        } else if self.registry.is_empty() {
            info!("No extensions to load");
        } else {
            info!("{} extensions loaded", self.registry.len());
        }
        Ok(results)
    }

    /// Every discoverable identifier with its loaded flag
    pub fn statuses(&self) -> Result<Vec<(ExtensionId, bool)>, ExtensionError> {
        Ok(self
            .discover()?
            .into_iter()
            .map(|id| {
                let loaded = self.is_loaded(&id);
                (id, loaded)
            })
            .collect())
    }

    /// After a failure, keep only what the host still holds
    fn sync_with_host(&mut self, id: &ExtensionId) {
        if !self.host.is_extension_registered(id) && self.registry.remove(id).is_some() {
            warn!("Extension {} is no longer active", id);
        }
    }
}
