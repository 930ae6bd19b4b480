//! Console harness: replays JSON-lines platform events from a reader and
//! plays the chat platform on stdout.
//!
//! ```text
//! {"type":"message","author_id":7,"text":"let's make a place for bug reports","guild_id":1,"channel_id":10}
//! {"type":"reaction","message_id":1001,"emoji":"👍","user_id":7}
//! {"type":"member_removed","user_id":7}
//! ```

use crate::actors::traits::ChatPlatform;
use crate::actors::SupervisorHandle;
use crate::error::{AppError, Result};
use crate::models::{CreatedChannel, IncomingMessage, PostedMessage, ReactionEvent};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// User ID the console bot posts as.
pub const CONSOLE_BOT_USER_ID: u64 = 1;

const FIRST_SNOWFLAKE: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    Message(IncomingMessage),
    Reaction {
        message_id: u64,
        emoji: String,
        user_id: u64,
        #[serde(default)]
        user_is_bot: bool,
    },
    MemberRemoved {
        user_id: u64,
    },
}

/// In-process platform that prints what a real one would do.
pub struct ConsolePlatform {
    bot_user_id: u64,
    next_id: AtomicU64,
    posted: Mutex<HashMap<u64, PostedMessage>>,
}

impl ConsolePlatform {
    pub fn new(bot_user_id: u64) -> Self {
        Self {
            bot_user_id,
            next_id: AtomicU64::new(FIRST_SNOWFLAKE),
            posted: Mutex::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// A message previously posted by the bot.
    pub fn posted(&self, id: u64) -> Option<PostedMessage> {
        self.posted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
    }

    /// Resolves a reaction target; unknown IDs become foreign, empty messages.
    fn reaction_target(&self, message_id: u64) -> PostedMessage {
        self.posted(message_id).unwrap_or(PostedMessage {
            id: message_id,
            author_id: 0,
            channel_id: 0,
            content: String::new(),
        })
    }
}

#[async_trait]
impl ChatPlatform for ConsolePlatform {
    fn bot_user_id(&self) -> u64 {
        self.bot_user_id
    }

    async fn create_text_channel(&self, guild_id: u64, name: &str) -> Result<CreatedChannel> {
        if name.is_empty() {
            return Err(AppError::Platform("Channel name must not be empty".to_string()));
        }
        let channel = CreatedChannel {
            id: self.next_id(),
            guild_id,
            name: name.to_string(),
        };
        println!("[guild {}] #{} created", guild_id, channel.name);
        Ok(channel)
    }

    async fn send_message(&self, channel_id: u64, text: &str) -> Result<PostedMessage> {
        let message = PostedMessage {
            id: self.next_id(),
            author_id: self.bot_user_id,
            channel_id,
            content: text.to_string(),
        };
        println!("[channel {}] ({}) {}", channel_id, message.id, text);
        self.posted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(message.id, message.clone());
        Ok(message)
    }
}

/// Feeds every line of `reader` to the supervisor until EOF.
///
/// Malformed lines and failing events are logged and skipped. Returns the
/// number of events dispatched.
pub async fn run<R>(reader: R, supervisor: &SupervisorHandle, platform: &ConsolePlatform) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut dispatched = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event: ConsoleEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping malformed event: {}", e);
                continue;
            }
        };

        if let Err(e) = dispatch(event, supervisor, platform).await {
            warn!("Event failed: {}", e);
        }
        dispatched += 1;
    }

    Ok(dispatched)
}

async fn dispatch(event: ConsoleEvent, supervisor: &SupervisorHandle, platform: &ConsolePlatform) -> Result<()> {
    match event {
        ConsoleEvent::Message(message) => {
            let outcome = supervisor.message_received(message).await?;
            info!("Message outcome: {:?}", outcome);
        }
        ConsoleEvent::Reaction {
            message_id,
            emoji,
            user_id,
            user_is_bot,
        } => {
            let reaction = ReactionEvent {
                message: platform.reaction_target(message_id),
                emoji,
                user_id,
                user_is_bot,
            };
            let outcome = supervisor.reaction_added(reaction).await?;
            info!("Reaction outcome: {:?}", outcome);
        }
        ConsoleEvent::MemberRemoved { user_id } => {
            let outcome = supervisor.member_removed(user_id).await?;
            info!("Departure outcome: {:?}", outcome);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let event: ConsoleEvent = serde_json::from_str(
            r#"{"type":"message","author_id":7,"text":"hi","guild_id":1,"channel_id":10}"#,
        )
        .unwrap();
        assert!(matches!(event, ConsoleEvent::Message(ref m) if m.author_id == 7 && !m.author_is_bot));

        let event: ConsoleEvent =
            serde_json::from_str(r#"{"type":"reaction","message_id":1001,"emoji":"👍","user_id":7}"#).unwrap();
        assert_eq!(
            event,
            ConsoleEvent::Reaction {
                message_id: 1001,
                emoji: "👍".to_string(),
                user_id: 7,
                user_is_bot: false
            }
        );

        let event: ConsoleEvent = serde_json::from_str(r#"{"type":"member_removed","user_id":7}"#).unwrap();
        assert_eq!(event, ConsoleEvent::MemberRemoved { user_id: 7 });
    }

    #[tokio::test]
    async fn test_platform_tracks_posted_messages() {
        let platform = ConsolePlatform::new(CONSOLE_BOT_USER_ID);

        let channel = platform.create_text_channel(1, "bug-reports").await.unwrap();
        let posted = platform.send_message(10, "Created channel: bug-reports").await.unwrap();

        assert_ne!(channel.id, posted.id);
        assert_eq!(platform.posted(posted.id).unwrap().author_id, CONSOLE_BOT_USER_ID);
        assert_eq!(platform.reaction_target(424242).author_id, 0);
        assert!(platform.create_text_channel(1, "").await.is_err());
    }
}
