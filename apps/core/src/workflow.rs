//! Channel creation workflow and reaction feedback.
//!
//! `IDLE -> EVALUATING -> (CREATING) -> IDLE` for every observed message:
//! blank text never reaches the classifier, and a channel is only created
//! when the score is above threshold and the global cooldown has elapsed.
//! Reactions on the bot's confirmation messages feed the mood and the
//! feedback log.
//!
//! Handlers take `&mut self`; callers must deliver events one at a time
//! (see [`crate::actors::SupervisorHandle`]).

use crate::actors::traits::ChatPlatform;
use crate::brain::classifier::is_channel_worthy;
use crate::brain::{ChannelNamer, ClassifierArtifacts};
use crate::config::BotConfig;
use crate::cooldown::Cooldown;
use crate::error::Result;
use crate::feedback::{FeedbackStore, Reaction};
use crate::models::{CreatedChannel, IncomingMessage, ReactionEvent};
use crate::mood::{Mood, PhraseSelector, RandomSelector};
use crate::state::StateStore;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Prefix of the confirmation posted after a channel is created.
pub const CONFIRMATION_PREFIX: &str = "Created channel:";

/// Recorded when a confirmation's channel name cannot be recovered.
pub const UNKNOWN_CHANNEL_NAME: &str = "unknown-channel";

// NOTE: expect() is acceptable here, the pattern is a compile-time constant.
static CONFIRMATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Created channel:[ \t]*(.+)").expect("Invalid regex: confirmation pattern")
});

pub fn confirmation_text(channel_name: &str) -> String {
    format!("{} {}", CONFIRMATION_PREFIX, channel_name)
}

/// Recovers the channel name embedded in a confirmation message.
pub fn extract_suggested_name(content: &str) -> Option<String> {
    CONFIRMATION_PATTERN
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// What happened to an observed message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// Authored by a bot; not logged, not evaluated.
    Ignored,
    /// Logged, but blank so never classified.
    Skipped,
    NotChannelWorthy { score: f32 },
    CooldownActive { remaining: Duration },
    Created {
        channel: CreatedChannel,
        /// ID of the confirmation message, if it could be posted.
        confirmation_id: Option<u64>,
    },
    /// The platform refused the channel; the cooldown was left untouched.
    CreationFailed { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReactionOutcome {
    Ignored,
    Recorded {
        reaction: Reaction,
        suggested_name: String,
        mood: Mood,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureOutcome {
    Removed,
    Unknown,
}

pub struct ChannelWorkflow<P: ChatPlatform> {
    platform: Arc<P>,
    artifacts: ClassifierArtifacts,
    namer: ChannelNamer,
    state: StateStore,
    feedback: FeedbackStore,
    cooldown: Cooldown,
    selector: Box<dyn PhraseSelector>,
    /// Confirmation message ID -> text of the message that triggered it.
    confirmations: HashMap<u64, String>,
}

impl<P: ChatPlatform> ChannelWorkflow<P> {
    /// Opens the state and feedback files named by `config`.
    pub fn new(platform: Arc<P>, artifacts: ClassifierArtifacts, config: &BotConfig) -> Result<Self> {
        Ok(Self {
            platform,
            artifacts,
            namer: ChannelNamer::new(&config.bot_name),
            state: StateStore::open(config.state_file())?,
            feedback: FeedbackStore::open(config.feedback_file())?,
            cooldown: Cooldown::new(config.cooldown()),
            selector: Box::new(RandomSelector),
            confirmations: HashMap::new(),
        })
    }

    /// Replaces the random reply picker, e.g. with a deterministic one.
    pub fn with_selector(mut self, selector: Box<dyn PhraseSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn feedback(&self) -> &FeedbackStore {
        &self.feedback
    }

    pub fn mood(&self) -> Mood {
        self.state.mood()
    }

    pub fn suggest_name(&self, message: &str) -> String {
        self.namer.suggest_name(message, &self.feedback)
    }

    pub async fn handle_message(&mut self, message: &IncomingMessage) -> Result<MessageOutcome> {
        self.handle_message_at(message, Instant::now()).await
    }

    /// Same as [`Self::handle_message`] with an explicit clock reading.
    #[instrument(skip(self, message, now), fields(author = message.author_id, guild = message.guild_id))]
    pub async fn handle_message_at(
        &mut self,
        message: &IncomingMessage,
        now: Instant,
    ) -> Result<MessageOutcome> {
        if message.author_is_bot {
            return Ok(MessageOutcome::Ignored);
        }

        self.state.log_user_message(message.author_id, &message.text)?;

        if message.text.trim().is_empty() {
            return Ok(MessageOutcome::Skipped);
        }

        let score = self.artifacts.score(&message.text);
        if !is_channel_worthy(score) {
            debug!(score, "Message is not channel-worthy");
            return Ok(MessageOutcome::NotChannelWorthy { score });
        }

        if !self.cooldown.is_ready(now) {
            warn!("Channel creation skipped due to cooldown.");
            return Ok(MessageOutcome::CooldownActive {
                remaining: self.cooldown.remaining(now),
            });
        }

        let name = self.suggest_name(&message.text);
        let channel = match self.platform.create_text_channel(message.guild_id, &name).await {
            Ok(channel) => channel,
            Err(e) => {
                error!("Failed to create channel '{}': {}", name, e);
                return Ok(MessageOutcome::CreationFailed {
                    name,
                    reason: e.to_string(),
                });
            }
        };
        self.cooldown.record(now);
        info!("Channel '{}' created in guild {}", channel.name, channel.guild_id);

        let confirmation_id = match self
            .platform
            .send_message(message.channel_id, &confirmation_text(&name))
            .await
        {
            Ok(posted) => {
                self.confirmations.insert(posted.id, message.text.clone());
                Some(posted.id)
            }
            Err(e) => {
                warn!("Channel '{}' created but confirmation failed: {}", channel.name, e);
                None
            }
        };

        Ok(MessageOutcome::Created {
            channel,
            confirmation_id,
        })
    }

    #[instrument(skip(self, event), fields(user = event.user_id, message = event.message.id))]
    pub async fn handle_reaction(&mut self, event: &ReactionEvent) -> Result<ReactionOutcome> {
        let bot_id = self.platform.bot_user_id();
        if event.user_is_bot || event.user_id == bot_id || event.message.author_id != bot_id {
            return Ok(ReactionOutcome::Ignored);
        }

        let Some(reaction) = Reaction::from_emoji(&event.emoji) else {
            return Ok(ReactionOutcome::Ignored);
        };

        let tracked = self.confirmations.get(&event.message.id).cloned();
        if tracked.is_none() && !event.message.content.contains(CONFIRMATION_PREFIX) {
            return Ok(ReactionOutcome::Ignored);
        }

        let suggested_name = extract_suggested_name(&event.message.content)
            .unwrap_or_else(|| UNKNOWN_CHANNEL_NAME.to_string());
        // Without the triggering message (e.g. after a restart) the confirmation
        // text itself is what gets recorded.
        let source = tracked.unwrap_or_else(|| event.message.content.clone());

        let mood = self.state.adjust_mood(reaction.is_positive())?;
        self.feedback.log_feedback(source, suggested_name.clone(), reaction)?;

        match reaction {
            Reaction::Up => info!("Received positive reinforcement from {} (mood {})", event.user_id, mood),
            Reaction::Down => warn!("Received negative reinforcement from {} (mood {})", event.user_id, mood),
        }

        let reply = mood.response_text(self.selector.as_mut());
        if let Err(e) = self.platform.send_message(event.message.channel_id, reply).await {
            warn!("Failed to send mood reply: {}", e);
        }

        Ok(ReactionOutcome::Recorded {
            reaction,
            suggested_name,
            mood,
        })
    }

    pub fn handle_member_removed(&mut self, user_id: u64) -> Result<DepartureOutcome> {
        if self.state.delete_user_data(user_id)? {
            Ok(DepartureOutcome::Removed)
        } else {
            debug!(user_id, "No data to delete for departed member");
            Ok(DepartureOutcome::Unknown)
        }
    }
}
