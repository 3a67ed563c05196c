//! Discord adapter
//!
//! Gateway connection, prefix parsing and owner checks are handled by
//! poise/serenity. This module wires the extension manager and the
//! moderation log into the framework and renders replies.

pub mod commands;

use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::application::errors::BotError;
use crate::application::services::{ExtensionManager, ModerationEmbeds, ModerationLog};
use crate::domain::entities::{Embed, GuildMember, ModerationAction, Reply};
use crate::infrastructure::cogs::CogHost;
use crate::infrastructure::config::Config;

/// Prefix for text commands
pub const COMMAND_PREFIX: &str = ">>";

/// Shown while the bot is connected
const ACTIVITY: &str = "for rule violations!";

/// The audit log entry for a kick or ban can arrive after the removal event
const REMOVAL_GRACE: Duration = Duration::from_secs(1);

pub type Context<'a> = poise::Context<'a, Data, BotError>;

/// State shared with every command and event handler
pub struct Data {
    /// Locked for the whole of each operation, so extension operations
    /// never interleave
    pub manager: Mutex<ExtensionManager<CogHost>>,
    pub config: Arc<Config>,
    pub moderation: Mutex<ModerationLog>,
}

impl Data {
    pub fn new(manager: ExtensionManager<CogHost>, config: Arc<Config>) -> Self {
        Self {
            manager: Mutex::new(manager),
            config,
            moderation: Mutex::new(ModerationLog::new()),
        }
    }
}

/// Discord bot adapter
pub struct DiscordAdapter {
    token: String,
    data: Data,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>, data: Data) -> Self {
        Self {
            token: token.into(),
            data,
        }
    }

    /// Connect to the gateway and run until the client stops
    pub async fn run(self) -> Result<(), BotError> {
        let data = self.data;

        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: commands::list(),
                prefix_options: poise::PrefixFrameworkOptions {
                    prefix: Some(COMMAND_PREFIX.to_string()),
                    ..Default::default()
                },
                event_handler: |ctx, event, framework, data| {
                    Box::pin(on_event(ctx, event, framework, data))
                },
                on_error: |error| Box::pin(on_error(error)),
                ..Default::default()
            })
            .setup(move |_ctx, _ready, _framework| Box::pin(async move { Ok(data) }))
            .build();

        let mut client = serenity::ClientBuilder::new(self.token, serenity::GatewayIntents::all())
            .framework(framework)
            .activity(serenity::ActivityData::watching(ACTIVITY))
            .status(serenity::OnlineStatus::DoNotDisturb)
            .await?;

        client.start().await?;
        Ok(())
    }
}

/// Fires on every gateway event. `Ready` arrives on the first connection and
/// after each reconnect; every discovered extension is (re)loaded then.
async fn on_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, BotError>,
    data: &Data,
) -> Result<(), BotError> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("(re)connected to the Discord API as {}", data_about_bot.user.name);

            let mut manager = data.manager.lock().await;
            manager.reload_all().await?;
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            let member = guild_member(&new_member.user, new_member.display_name());
            let channel = data.config.membership_channel(new_member.guild_id.get());
            post(ctx, channel, ModerationEmbeds::joined(&member)).await?;
        }
        serenity::FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            tokio::time::sleep(REMOVAL_GRACE).await;

            let reason = data
                .moderation
                .lock()
                .await
                .leave_reason(guild_id.get(), user.id.get());
            let member = guild_member(user, user.display_name());
            let channel = data.config.membership_channel(guild_id.get());
            post(ctx, channel, ModerationEmbeds::left(&member, reason)).await?;
        }
        serenity::FullEvent::GuildAuditLogEntryCreate { entry, guild_id } => {
            on_audit_log_entry(ctx, entry, guild_id.get(), data).await?;
        }
        _ => {}
    }
    Ok(())
}

/// Records member actions and posts them to the transparency channel
async fn on_audit_log_entry(
    ctx: &serenity::Context,
    entry: &serenity::AuditLogEntry,
    guild_id: u64,
    data: &Data,
) -> Result<(), BotError> {
    let Some(action) = moderation_action(entry) else {
        return Ok(());
    };
    data.moderation.lock().await.record(guild_id, action);

    let channel = data.config.transparency_channel(guild_id);
    let embed = match action.target() {
        Some(target) => {
            let user = serenity::UserId::new(target).to_user(ctx).await?;
            let member = guild_member(&user, user.display_name());
            ModerationEmbeds::action(&action, &member, entry.reason.as_deref())
        }
        None => match action {
            ModerationAction::Prune { removed } => ModerationEmbeds::pruned(removed),
            _ => None,
        },
    };

    match embed {
        Some(embed) => post(ctx, channel, embed).await,
        None => Ok(()),
    }
}

/// The member actions the moderation log cares about
fn moderation_action(entry: &serenity::AuditLogEntry) -> Option<ModerationAction> {
    use ::serenity::model::guild::audit_log::{Action, MemberAction};

    let target = entry.target_id.map(|id| id.get());
    match entry.action {
        Action::Member(MemberAction::BanAdd) => Some(ModerationAction::Ban { user: target? }),
        Action::Member(MemberAction::BanRemove) => Some(ModerationAction::Unban { user: target? }),
        Action::Member(MemberAction::Kick) => Some(ModerationAction::Kick { user: target? }),
        Action::Member(MemberAction::Prune) => Some(ModerationAction::Prune {
            removed: entry
                .options
                .as_ref()
                .and_then(|options| options.members_removed)
                .unwrap_or(0),
        }),
        _ => None,
    }
}

fn guild_member(user: &serenity::User, display_name: &str) -> GuildMember {
    GuildMember::new(user.id.get(), user.name.clone())
        .with_display_name(display_name)
        .with_avatar(user.avatar_url())
}

/// Post an embed to a configured channel; guilds without one are skipped
async fn post(ctx: &serenity::Context, channel: Option<u64>, embed: Embed) -> Result<(), BotError> {
    let Some(channel) = channel else {
        debug!("No channel configured for: {}", embed.title);
        return Ok(());
    };

    serenity::ChannelId::new(channel)
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(to_embed(embed)))
        .await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, BotError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {}", error);
        }
        poise::FrameworkError::EventHandler { error, .. } => {
            error!("Event handler failed: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command '{}' failed: {}", ctx.command().name, error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Send a reply to the invoking channel
pub async fn send(ctx: Context<'_>, reply: Reply) -> Result<(), BotError> {
    ctx.send(render(reply)).await?;
    Ok(())
}

fn render(reply: Reply) -> poise::CreateReply {
    match reply {
        Reply::Text(text) => poise::CreateReply::default().content(text),
        Reply::Embed(embed) => poise::CreateReply::default().embed(to_embed(embed)),
    }
}

fn to_embed(embed: Embed) -> serenity::CreateEmbed {
    let mut out = serenity::CreateEmbed::new()
        .title(embed.title)
        .colour(embed.color);

    if let Some(description) = embed.description {
        out = out.description(description);
    }

    if let Some(url) = embed.thumbnail {
        out = out.thumbnail(url);
    }

    for field in embed.fields {
        out = out.field(field.name, field.value, field.inline);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::COLOR_STATUS;

    #[test]
    fn test_embed_rendering() {
        let embed = Embed::new("Extension Status", COLOR_STATUS)
            .with_description("all cogs")
            .with_field("ranks", ":white_check_mark:");

        let json = serde_json::to_value(to_embed(embed)).unwrap();

        assert_eq!(json["title"], "Extension Status");
        assert_eq!(json["description"], "all cogs");
        assert_eq!(json["color"], COLOR_STATUS);
        assert_eq!(json["fields"][0]["name"], "ranks");
        assert_eq!(json["fields"][0]["value"], ":white_check_mark:");
        assert_eq!(json["fields"][0]["inline"], true);
    }

    #[test]
    fn test_moderation_embed_rendering() {
        let member = GuildMember::new(7, "alice")
            .with_avatar(Some("https://cdn.example/alice.png".to_string()));
        let embed =
            ModerationEmbeds::action(&ModerationAction::Kick { user: 7 }, &member, Some("spam"))
                .unwrap();

        let json = serde_json::to_value(to_embed(embed)).unwrap();

        assert_eq!(json["title"], "alice was kicked");
        assert_eq!(json["thumbnail"]["url"], "https://cdn.example/alice.png");
        assert_eq!(json["fields"][2]["name"], "Reason");
        assert_eq!(json["fields"][2]["inline"], false);
    }
}
