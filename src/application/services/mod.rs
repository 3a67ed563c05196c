//! Application services - Business logic orchestration

pub mod command_service;
pub mod extension_service;
pub mod moderation_service;

pub use command_service::ExtensionCommands;
pub use extension_service::{ExtensionManager, ExtensionRegistry};
pub use moderation_service::{ModerationEmbeds, ModerationLog};
