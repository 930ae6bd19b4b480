//! Append-only log of human judgments on suggested channel names.

use crate::error::Result;
use crate::storage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Up,
    Down,
}

impl Reaction {
    /// Maps a reaction emoji to feedback polarity; other emoji carry none.
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        match emoji {
            "👍" => Some(Reaction::Up),
            "👎" => Some(Reaction::Down),
            _ => None,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Reaction::Up
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Up => write!(f, "up"),
            Reaction::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub message: String,
    pub suggested_name: String,
    pub reaction: Reaction,
}

/// Feedback records in insertion order, mirrored to a JSON array on disk.
#[derive(Debug)]
pub struct FeedbackStore {
    path: PathBuf,
    records: Vec<FeedbackRecord>,
}

impl FeedbackStore {
    /// Opens the store; an absent file means an empty log.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records: Vec<FeedbackRecord> = storage::load_or_default(&path)?;
        debug!("Loaded {} feedback records from {:?}", records.len(), path);
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record and rewrites the whole log. Duplicates accumulate.
    pub fn log_feedback(
        &mut self,
        message: impl Into<String>,
        suggested_name: impl Into<String>,
        reaction: Reaction,
    ) -> Result<()> {
        self.records.push(FeedbackRecord {
            message: message.into(),
            suggested_name: suggested_name.into(),
            reaction,
        });
        storage::save_atomic(&self.path, &self.records)
    }

    /// Most recent approved name for `message` (case-insensitive exact match).
    pub fn approved_name_for(&self, message: &str) -> Option<&str> {
        let wanted = message.to_lowercase();
        self.records
            .iter()
            .rev()
            .find(|r| r.reaction.is_positive() && r.message.to_lowercase() == wanted)
            .map(|r| r.suggested_name.as_str())
    }
}
