//! Owner-only extension commands

use super::{send, Context, Data};
use crate::application::errors::BotError;
use crate::application::services::ExtensionCommands;

/// All commands registered with the framework
pub fn list() -> Vec<poise::Command<Data, BotError>> {
    vec![load(), unload(), extensions(), reload_all()]
}

/// Load an extension, or reload it if it is already loaded
#[poise::command(prefix_command, owners_only)]
pub async fn load(ctx: Context<'_>, module: String) -> Result<(), BotError> {
    let reply = {
        let mut manager = ctx.data().manager.lock().await;
        ExtensionCommands::load(&mut *manager, &module).await
    };
    send(ctx, reply).await
}

/// Unload an extension
#[poise::command(prefix_command, owners_only)]
pub async fn unload(ctx: Context<'_>, module: String) -> Result<(), BotError> {
    let reply = {
        let mut manager = ctx.data().manager.lock().await;
        ExtensionCommands::unload(&mut *manager, &module).await
    };
    send(ctx, reply).await
}

/// List every extension and whether it is loaded
#[poise::command(prefix_command, owners_only)]
pub async fn extensions(ctx: Context<'_>) -> Result<(), BotError> {
    let reply = {
        let manager = ctx.data().manager.lock().await;
        ExtensionCommands::list(&*manager)
    };
    send(ctx, reply).await
}

/// Reload every extension
#[poise::command(prefix_command, owners_only, rename = "reloadall")]
pub async fn reload_all(ctx: Context<'_>) -> Result<(), BotError> {
    let reply = {
        let mut manager = ctx.data().manager.lock().await;
        ExtensionCommands::reload_all(&mut *manager).await
    };
    send(ctx, reply).await
}
