//! Domain traits - Abstractions for infrastructure implementations

pub mod host;
pub mod source;

pub use host::ExtensionHost;
pub use source::ExtensionSource;
