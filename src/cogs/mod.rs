//! Cogs for eikumi
//!
//! A cog is a self-contained unit of bot behaviour. Cogs are compiled in and
//! registered in a [`CogCatalog`]; a manifest file in the cog directory makes
//! one available for loading.

pub mod ranks;
pub mod trait_def;

use std::collections::HashMap;

use crate::domain::entities::ExtensionId;

pub use trait_def::{Cog, CogContext, CogError, CogFactory};

/// Maps extension identifiers to cog constructors
#[derive(Default)]
pub struct CogCatalog {
    entries: HashMap<ExtensionId, CogFactory>,
}

impl CogCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every cog shipped with the bot
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register("ranks", ranks::Ranks::boxed);
        catalog
    }

    pub fn register(&mut self, id: impl Into<ExtensionId>, factory: CogFactory) {
        self.entries.insert(id.into(), factory);
    }

    pub fn get(&self, id: &ExtensionId) -> Option<CogFactory> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
