use crate::domain::entities::ExtensionId;
use crate::application::errors::ExtensionError;

/// ExtensionSource trait - enumerates the extensions available to load
pub trait ExtensionSource: Send + Sync {
    /// List available identifiers. Implementations may return them in any
    /// order; callers sort.
    fn discover(&self) -> Result<Vec<ExtensionId>, ExtensionError>;
}
