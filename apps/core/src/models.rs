use serde::{Deserialize, Serialize};

/// A message observed in a guild channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub author_id: u64,
    /// Messages from bots (including this one) are never processed.
    #[serde(default)]
    pub author_is_bot: bool,
    pub text: String,
    pub guild_id: u64,
    pub channel_id: u64,
}

/// A message as it exists on the platform, e.g. the target of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedMessage {
    pub id: u64,
    pub author_id: u64,
    pub channel_id: u64,
    pub content: String,
}

/// A reaction added by `user_id` on `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub message: PostedMessage,
    pub emoji: String,
    pub user_id: u64,
    #[serde(default)]
    pub user_is_bot: bool,
}

/// A text channel created on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedChannel {
    pub id: u64,
    pub guild_id: u64,
    pub name: String,
}
