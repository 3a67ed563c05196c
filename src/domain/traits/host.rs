use async_trait::async_trait;
use crate::domain::entities::ExtensionId;
use crate::application::errors::ExtensionError;

/// ExtensionHost trait - the capability primitives a bot framework offers
/// for bringing extensions in and out of a running bot
#[async_trait]
pub trait ExtensionHost: Send + Sync {
    /// Load an extension that is not currently live
    async fn load_extension(&mut self, id: &ExtensionId) -> Result<(), ExtensionError>;

    /// Replace a live extension with a freshly loaded instance
    async fn reload_extension(&mut self, id: &ExtensionId) -> Result<(), ExtensionError>;

    /// Remove a live extension
    async fn unload_extension(&mut self, id: &ExtensionId) -> Result<(), ExtensionError>;

    /// Whether the host currently holds a live instance
    fn is_extension_registered(&self, id: &ExtensionId) -> bool;
}
