//! Inbound message context.

use serde::{Deserialize, Serialize};
use sleep_common::{GroupId, UserId};

/// Platform name used when an event does not carry one.
pub const DEFAULT_PLATFORM: &str = "onebot";

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

/// One inbound message and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Message text.
    #[serde(default)]
    pub content: Option<String>,
    /// Group the message was sent in; absent for private messages.
    #[serde(default)]
    pub guild_id: Option<GroupId>,
    /// Sender.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Platform the message arrived on.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Identity of the bot that received the message.
    #[serde(default)]
    pub self_id: String,
}

impl Session {
    /// Creates a group message session.
    pub fn group(content: &str, user_id: UserId, guild_id: GroupId, self_id: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            guild_id: Some(guild_id),
            user_id: Some(user_id),
            platform: default_platform(),
            self_id: self_id.to_string(),
        }
    }

    /// Creates a private message session.
    pub fn private(content: &str, user_id: UserId, self_id: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            guild_id: None,
            user_id: Some(user_id),
            platform: default_platform(),
            self_id: self_id.to_string(),
        }
    }

    /// Non-empty message text.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|content| !content.is_empty())
    }

    /// Sender and group, when the message is a group message with a known sender.
    pub fn group_sender(&self) -> Option<(&UserId, &GroupId)> {
        self.user_id.as_ref().zip(self.guild_id.as_ref())
    }
}
