use std::collections::HashMap;

use crate::domain::entities::{
    Embed, GuildMember, LeaveReason, ModerationAction, COLOR_BAN, COLOR_JOIN, COLOR_KICK,
    COLOR_LEAVE, COLOR_PRUNE,
};

/// Members recently removed by a moderator in one guild
#[derive(Debug, Default)]
struct GuildCache {
    banned: Vec<u64>,
    kicked: Vec<u64>,
}

/// Tracks kicks and bans from the audit log so the member removal that
/// follows can be labelled with the right reason
#[derive(Debug, Default)]
pub struct ModerationLog {
    guilds: HashMap<u64, GuildCache>,
}

impl ModerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a moderation action. Bans and kicks are kept until the
    /// matching removal arrives; an unban forgets a pending ban.
    pub fn record(&mut self, guild: u64, action: ModerationAction) {
        match action {
            ModerationAction::Ban { user } => {
                self.guilds.entry(guild).or_default().banned.push(user)
            }
            ModerationAction::Kick { user } => {
                self.guilds.entry(guild).or_default().kicked.push(user)
            }
            ModerationAction::Unban { user } => {
                if let Some(cache) = self.guilds.get_mut(&guild) {
                    forget(&mut cache.banned, user);
                }
            }
            ModerationAction::Prune { .. } => {}
        }
    }

    /// Decide why a member left, consuming any pending kick or ban for them.
    /// A ban wins over a kick.
    pub fn leave_reason(&mut self, guild: u64, user: u64) -> LeaveReason {
        let Some(cache) = self.guilds.get_mut(&guild) else {
            return LeaveReason::Voluntary;
        };

        let kicked = forget(&mut cache.kicked, user);
        let banned = forget(&mut cache.banned, user);

        if banned {
            LeaveReason::Banned
        } else if kicked {
            LeaveReason::Kicked
        } else {
            LeaveReason::Voluntary
        }
    }
}

fn forget(users: &mut Vec<u64>, user: u64) -> bool {
    match users.iter().position(|u| *u == user) {
        Some(idx) => {
            users.swap_remove(idx);
            true
        }
        None => false,
    }
}

/// Builds the embeds posted to the membership and transparency channels
pub struct ModerationEmbeds;

impl ModerationEmbeds {
    /// Membership channel: someone joined
    pub fn joined(member: &GuildMember) -> Embed {
        with_member(
            Embed::new(format!("{} joined the server", member.display_name), COLOR_JOIN),
            member,
        )
    }

    /// Membership channel: someone left, was kicked or was banned
    pub fn left(member: &GuildMember, reason: LeaveReason) -> Embed {
        let (title, color) = match reason {
            LeaveReason::Voluntary => {
                (format!("{} left the server", member.display_name), COLOR_LEAVE)
            }
            LeaveReason::Kicked => (format!("{} was kicked", member.display_name), COLOR_KICK),
            LeaveReason::Banned => (format!("{} was banned", member.display_name), COLOR_BAN),
        };
        with_member(Embed::new(title, color), member)
    }

    /// Transparency channel: a ban, unban or kick with its audit log reason
    pub fn action(
        action: &ModerationAction,
        target: &GuildMember,
        reason: Option<&str>,
    ) -> Option<Embed> {
        let (verb, color) = match action {
            ModerationAction::Ban { .. } => ("banned", COLOR_LEAVE),
            ModerationAction::Unban { .. } => ("unbanned", COLOR_JOIN),
            ModerationAction::Kick { .. } => ("kicked", COLOR_KICK),
            ModerationAction::Prune { .. } => return None,
        };

        let embed = with_member(
            Embed::new(format!("{} was {}", target.display_name, verb), color),
            target,
        );
        Some(match reason {
            Some(reason) => embed.with_wide_field("Reason", reason),
            None => embed,
        })
    }

    /// Transparency channel: a prune. Nothing to post when nobody was removed.
    pub fn pruned(removed: u64) -> Option<Embed> {
        match removed {
            0 => None,
            1 => Some(Embed::new("1 user was pruned", COLOR_PRUNE)),
            n => Some(Embed::new(format!("{} users were pruned", n), COLOR_PRUNE)),
        }
    }
}

fn with_member(embed: Embed, member: &GuildMember) -> Embed {
    let embed = embed
        .with_field("User ID", member.id.to_string())
        .with_field("Username", member.username.clone());

    match &member.avatar_url {
        Some(url) => embed.with_thumbnail(url.clone()),
        None => embed,
    }
}
