use crate::actors::traits::ChatPlatform;
use crate::brain::{ChannelNet, ClassifierArtifacts, Vectorizer};
use crate::config::BotConfig;
use crate::error::AppError;
use crate::models::{CreatedChannel, PostedMessage};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const BOT_ID: u64 = 99;
pub const GUILD_ID: u64 = 1;
pub const CHANNEL_ID: u64 = 10;

// --- Mock Components ---

/// Records every platform call; creation and sending can be made to fail.
pub struct MockPlatform {
    next_id: AtomicU64,
    pub created: Arc<Mutex<Vec<CreatedChannel>>>,
    pub sent: Arc<Mutex<Vec<PostedMessage>>>,
    pub fail_create: AtomicBool,
    pub fail_send: AtomicBool,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(500),
            created: Arc::new(Mutex::new(Vec::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_create: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
        }
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created.lock().unwrap().iter().map(|c| c.name.clone()).collect()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|m| m.content.clone()).collect()
    }

    pub fn sent_message(&self, id: u64) -> PostedMessage {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .expect("message was not sent")
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    fn bot_user_id(&self) -> u64 {
        BOT_ID
    }

    async fn create_text_channel(&self, guild_id: u64, name: &str) -> Result<CreatedChannel, AppError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::Platform("Missing Permissions".to_string()));
        }
        let channel = CreatedChannel {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            guild_id,
            name: name.to_string(),
        };
        self.created.lock().unwrap().push(channel.clone());
        Ok(channel)
    }

    async fn send_message(&self, channel_id: u64, text: &str) -> Result<PostedMessage, AppError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(AppError::Platform("Cannot send messages".to_string()));
        }
        let message = PostedMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            author_id: BOT_ID,
            channel_id,
            content: text.to_string(),
        };
        self.sent.lock().unwrap().push(message.clone());
        Ok(message)
    }
}

/// Scores above threshold iff the text contains "channel" or "bug".
pub fn tiny_artifacts() -> ClassifierArtifacts {
    let vectorizer = Vectorizer::from_tokens(["channel", "bug", "hello"]).unwrap();
    let model = ChannelNet::new(vec![vec![10.0, 10.0, 0.0]], vec![0.0], vec![1.0], -5.0).unwrap();
    ClassifierArtifacts::new(vectorizer, model).unwrap()
}

pub fn config_in(root: &Path) -> BotConfig {
    BotConfig {
        data_dir: root.join("data"),
        models_dir: root.join("models"),
        ..BotConfig::default()
    }
}
