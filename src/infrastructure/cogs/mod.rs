//! Cog infrastructure
//!
//! Each cog is announced by a YAML manifest in the cog directory and built
//! from the compiled-in catalog when loaded.

pub mod host;
pub mod manifest;
pub mod source;

pub use host::CogHost;
pub use source::DirectorySource;
