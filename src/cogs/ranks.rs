//! The ranking system

use std::sync::Arc;

use async_trait::async_trait;

use super::trait_def::{Cog, CogContext, CogError};
use crate::infrastructure::config::Config;

#[derive(Default)]
pub struct Ranks {
    config: Option<Arc<Config>>,
}

impl Ranks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Box<dyn Cog> {
        Box::new(Self::new())
    }
}

#[async_trait]
impl Cog for Ranks {
    fn name(&self) -> &str {
        "ranks"
    }

    fn description(&self) -> &str {
        "The ranking system."
    }

    async fn setup(&mut self, ctx: &CogContext) -> Result<(), CogError> {
        tracing::debug!("Ranks configured for {} guilds", ctx.config.guilds.len());
        self.config = Some(ctx.config.clone());
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), CogError> {
        self.config = None;
        Ok(())
    }
}
