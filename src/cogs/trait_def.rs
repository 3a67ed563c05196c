//! Cog trait definitions

use std::sync::Arc;

use async_trait::async_trait;

use crate::infrastructure::config::Config;

/// Error type cogs return from setup and teardown
pub type CogError = Box<dyn std::error::Error + Send + Sync>;

/// Core trait that every cog implements
#[async_trait]
pub trait Cog: Send + Sync {
    /// Unique identifier for the cog
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Called when the cog is loaded. Returning an error aborts the load.
    async fn setup(&mut self, ctx: &CogContext) -> Result<(), CogError>;

    /// Optional: release resources when the cog is unloaded
    async fn teardown(&mut self) -> Result<(), CogError> {
        Ok(())
    }
}

/// What a cog receives at setup
#[derive(Debug, Clone)]
pub struct CogContext {
    pub config: Arc<Config>,
    /// Free-form `settings` block from the cog's manifest
    pub settings: serde_yaml::Value,
}

impl CogContext {
    pub fn new(config: Arc<Config>, settings: serde_yaml::Value) -> Self {
        Self { config, settings }
    }
}

/// Constructor for a cog instance
pub type CogFactory = fn() -> Box<dyn Cog>;
