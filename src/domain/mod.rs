//! Domain layer - Core business logic with no platform dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (ExtensionId, LoadResult, Reply)
//! - Traits: Abstractions for infrastructure (ExtensionHost, ExtensionSource)

pub mod entities;
pub mod traits;
