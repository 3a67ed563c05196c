/// Colour used for failure reports
pub const COLOR_FAILURE: u32 = 0x9C0B21;

/// Colour used for status listings
pub const COLOR_STATUS: u32 = 0x2ECC71;

// Moderation log colours
pub const COLOR_JOIN: u32 = 0x1F8B4C;
pub const COLOR_LEAVE: u32 = 0xE74C3C;
pub const COLOR_BAN: u32 = 0x992D22;
pub const COLOR_KICK: u32 = 0xE67E22;
pub const COLOR_PRUNE: u32 = 0x9B59B6;

/// A response produced by a command handler, independent of the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

#[cfg(test)]
impl Reply {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s),
            Reply::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            Reply::Embed(e) => Some(e),
            Reply::Text(_) => None,
        }
    }
}

impl From<Embed> for Reply {
    fn from(embed: Embed) -> Self {
        Reply::Embed(embed)
    }
}

/// Rich message with a title, optional description and thumbnail, and fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub thumbnail: Option<String>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            thumbnail: None,
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Add an inline field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }

    /// Add a field spanning the full width
    pub fn with_wide_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}
