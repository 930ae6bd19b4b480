//! Runtime configuration loaded from the environment (and `.env`).

use crate::error::{AppError, Result};
use crate::fs_manager::PortablePathManager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

pub const BOT_NAME_ENV: &str = "MELLI_BOT_NAME";
pub const DATA_DIR_ENV: &str = "MELLI_DATA_DIR";
pub const MODELS_DIR_ENV: &str = "MELLI_MODELS_DIR";
pub const COOLDOWN_ENV: &str = "MELLI_COOLDOWN_SECS";
pub const LOG_FORMAT_ENV: &str = "MELLI_LOG_FORMAT";

pub const DEFAULT_BOT_NAME: &str = "melli";
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;

const STATE_FILENAME: &str = "melli_data.json";
const FEEDBACK_FILENAME: &str = "feedback.json";
const VECTORIZER_FILENAME: &str = "vectorizer.bin";
const MODEL_FILENAME: &str = "model.bin";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BotConfig {
    /// Name the bot answers to; also filtered out of suggested channel names.
    #[validate(length(min = 1))]
    pub bot_name: String,
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
    /// Minimum delay between two successful channel creations.
    #[validate(range(min = 1, max = 86400))]
    pub cooldown_secs: u64,
    pub log_format: LogFormat,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_string(),
            data_dir: PortablePathManager::data_dir(),
            models_dir: PortablePathManager::models_dir(),
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            log_format: LogFormat::default(),
        }
    }
}

impl BotConfig {
    /// Reads `.env` (if any) then the `MELLI_*` variables over the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Some(name) = env_var(BOT_NAME_ENV) {
            config.bot_name = name.trim().to_lowercase();
        }
        if let Some(dir) = env_var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env_var(MODELS_DIR_ENV) {
            config.models_dir = PathBuf::from(dir);
        }
        if let Some(secs) = env_var(COOLDOWN_ENV) {
            config.cooldown_secs = secs.trim().parse().map_err(|e| {
                AppError::Config(format!("{} must be an integer: {}", COOLDOWN_ENV, e))
            })?;
        }
        if let Some(format) = env_var(LOG_FORMAT_ENV) {
            config.log_format = format.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join(STATE_FILENAME)
    }

    pub fn feedback_file(&self) -> PathBuf {
        self.data_dir.join(FEEDBACK_FILENAME)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(VECTORIZER_FILENAME)
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILENAME)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
