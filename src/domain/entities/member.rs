/// The parts of a guild member that moderation logs show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl GuildMember {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id,
            display_name: username.clone(),
            username,
            avatar_url: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_avatar(mut self, url: Option<String>) -> Self {
        self.avatar_url = url;
        self
    }
}

/// Why a member disappeared from a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveReason {
    Voluntary,
    Kicked,
    Banned,
}

/// Member actions taken from the guild audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Ban { user: u64 },
    Unban { user: u64 },
    Kick { user: u64 },
    Prune { removed: u64 },
}

impl ModerationAction {
    /// The member the action targets, if it names one
    pub fn target(&self) -> Option<u64> {
        match self {
            ModerationAction::Ban { user }
            | ModerationAction::Unban { user }
            | ModerationAction::Kick { user } => Some(*user),
            ModerationAction::Prune { .. } => None,
        }
    }
}
