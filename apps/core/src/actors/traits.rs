use crate::error::AppError;
use crate::models::{CreatedChannel, PostedMessage};
use async_trait::async_trait;

/// Defines the outbound calls the bot makes on the chat platform.
///
/// This trait abstracts the platform client so that the workflow can be
/// driven by a real gateway connection, the console harness, or a test mock.
#[async_trait]
pub trait ChatPlatform: Send + Sync + 'static {
    /// User ID the bot posts as.
    fn bot_user_id(&self) -> u64;

    /// Creates a text channel named `name` in the given guild.
    async fn create_text_channel(&self, guild_id: u64, name: &str) -> Result<CreatedChannel, AppError>;

    /// Posts `text` in a channel and returns the posted message.
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<PostedMessage, AppError>;
}
