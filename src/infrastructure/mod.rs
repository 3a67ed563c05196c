//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Cogs: Cog discovery, manifests and hosting
//! - Adapters: Platform integrations (Discord)

pub mod adapters;
pub mod cogs;
pub mod config;
