//! Persistent bot state: per-user message history and mood.
//!
//! Every mutation rewrites the whole state file before returning.

use crate::error::Result;
use crate::mood::Mood;
use crate::storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk layout: `{"user_logs": {"<id>": [...]}, "mood": <int>}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default)]
    pub user_logs: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub mood: Mood,
}

#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: PersistentState,
}

impl StateStore {
    /// Opens the store; an absent file means no logs and mood 0.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state: PersistentState = storage::load_or_default(&path)?;
        debug!(
            "Loaded state from {:?}: {} users, mood {}",
            path,
            state.user_logs.len(),
            state.mood
        );
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &PersistentState {
        &self.state
    }

    pub fn mood(&self) -> Mood {
        self.state.mood
    }

    pub fn messages_for(&self, user_id: u64) -> Option<&[String]> {
        self.state
            .user_logs
            .get(&user_id.to_string())
            .map(Vec::as_slice)
    }

    /// Appends `message` to the user's history, creating it on first message.
    pub fn log_user_message(&mut self, user_id: u64, message: &str) -> Result<()> {
        self.state
            .user_logs
            .entry(user_id.to_string())
            .or_default()
            .push(message.to_string());
        self.save()
    }

    /// Drops the user's whole history. Returns whether there was one.
    pub fn delete_user_data(&mut self, user_id: u64) -> Result<bool> {
        if self.state.user_logs.remove(&user_id.to_string()).is_none() {
            return Ok(false);
        }
        self.save()?;
        info!(user_id, "Deleted user message log");
        Ok(true)
    }

    /// Applies one feedback signal to the mood and persists it.
    pub fn adjust_mood(&mut self, success: bool) -> Result<Mood> {
        self.state.mood = self.state.mood.adjusted(success);
        self.save()?;
        Ok(self.state.mood)
    }

    fn save(&self) -> Result<()> {
        storage::save_atomic(&self.path, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_state_defaults() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("melli_data.json")).unwrap();
        assert_eq!(store.mood().value(), 0);
        assert!(store.state().user_logs.is_empty());
    }

    #[test]
    fn test_messages_kept_in_arrival_order_with_duplicates() {
        let dir = tempdir().unwrap();
        let mut store = StateStore::open(dir.path().join("melli_data.json")).unwrap();

        store.log_user_message(42, "hi").unwrap();
        store.log_user_message(42, "hi").unwrap();
        store.log_user_message(42, "bye").unwrap();

        assert_eq!(store.messages_for(42).unwrap(), ["hi", "hi", "bye"]);
    }

    #[test]
    fn test_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("melli_data.json");
        let mut store = StateStore::open(&path).unwrap();

        store.log_user_message(954135885392252940, "hello").unwrap();
        store.adjust_mood(false).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["mood"], -1);
        assert_eq!(raw["user_logs"]["954135885392252940"][0], "hello");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("melli_data.json");
        fs::write(&path, r#"{"mood": 3}"#).unwrap();

        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.mood().value(), 3);
        assert!(store.state().user_logs.is_empty());
    }

    #[test]
    fn test_delete_unknown_user_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("melli_data.json");
        let mut store = StateStore::open(&path).unwrap();

        assert!(!store.delete_user_data(7).unwrap());
        assert!(!path.exists());
    }
}
