//! Domain entities - Core business objects with no platform dependencies

pub mod extension;
pub mod member;
pub mod reply;

pub use extension::{ExtensionId, ExtensionRecord, LoadResult, UnloadOutcome};
pub use member::{GuildMember, LeaveReason, ModerationAction};
pub use reply::{
    Embed, EmbedField, Reply, COLOR_BAN, COLOR_FAILURE, COLOR_JOIN, COLOR_KICK, COLOR_LEAVE,
    COLOR_PRUNE, COLOR_STATUS,
};
