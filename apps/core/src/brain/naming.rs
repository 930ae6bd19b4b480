//! Channel name suggestion.
//!
//! Names are slugs of the first few meaningful words of a message, unless
//! a human previously approved a name for the very same message.

use crate::feedback::FeedbackStore;
use std::collections::HashSet;

/// Stopwords dropped from channel names (the bot's own name is added at runtime).
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "for", "we", "should", "can", "let's", "have", "place", "make", "me",
];

/// Name used when nothing meaningful is left in the message.
pub const FALLBACK_CHANNEL_NAME: &str = "new-channel";

/// Maximum channel name length, in characters.
pub const MAX_CHANNEL_NAME_LEN: usize = 90;

const MAX_NAME_WORDS: usize = 3;

/// Lowercases and keeps only ASCII letters, digits and whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

pub struct ChannelNamer {
    stop_words: HashSet<String>,
}

impl ChannelNamer {
    pub fn new(bot_name: &str) -> Self {
        // Stopwords go through the same normalization as message words,
        // so "let's" filters the token "lets".
        let stop_words = STOP_WORDS
            .iter()
            .copied()
            .chain(std::iter::once(bot_name))
            .map(normalize)
            .filter(|w| !w.trim().is_empty())
            .collect();

        Self { stop_words }
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Normalized words of `message` with stopwords removed, in order.
    pub fn tokens(&self, message: &str) -> Vec<String> {
        normalize(message)
            .split_whitespace()
            .filter(|w| !self.is_stopword(w))
            .map(str::to_string)
            .collect()
    }

    /// Suggests a channel name for `message`.
    ///
    /// Blank or all-stopword messages get [`FALLBACK_CHANNEL_NAME`]. Otherwise
    /// the most recent approved name for the same message (case-insensitive)
    /// is returned verbatim, and failing that the first three words joined by
    /// `-`, cut to [`MAX_CHANNEL_NAME_LEN`] characters.
    pub fn suggest_name(&self, message: &str, feedback: &FeedbackStore) -> String {
        let words = self.tokens(message);
        if words.is_empty() {
            return FALLBACK_CHANNEL_NAME.to_string();
        }

        if let Some(approved) = feedback.approved_name_for(message) {
            return approved.to_string();
        }

        slug(&words)
    }
}

fn slug(words: &[String]) -> String {
    let joined = words
        .iter()
        .take(MAX_NAME_WORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("-");
    joined.chars().take(MAX_CHANNEL_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Reaction;
    use tempfile::{tempdir, TempDir};

    fn empty_feedback() -> (TempDir, FeedbackStore) {
        let dir = tempdir().unwrap();
        let store = FeedbackStore::open(dir.path().join("feedback.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_stopwords_and_bot_name_removed() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");

        assert_eq!(
            namer.tokens("let's make a place for melli bug reports"),
            vec!["bug", "reports"]
        );
        assert_eq!(
            namer.suggest_name("let's make a place for melli bug reports", &feedback),
            "bug-reports"
        );
    }

    #[test]
    fn test_curly_apostrophe_also_filtered() {
        let namer = ChannelNamer::new("melli");
        assert_eq!(namer.tokens("Let’s talk"), vec!["talk"]);
    }

    #[test]
    fn test_punctuation_and_non_ascii_stripped() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");

        assert_eq!(namer.suggest_name("Café RUST-lang meetup!!! 2024", &feedback), "caf-rustlang-meetup");
    }

    #[test]
    fn test_blank_or_stopword_only_falls_back() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");

        assert_eq!(namer.suggest_name("", &feedback), FALLBACK_CHANNEL_NAME);
        assert_eq!(namer.suggest_name("   ", &feedback), FALLBACK_CHANNEL_NAME);
        assert_eq!(namer.suggest_name("Make me a place, Melli!", &feedback), FALLBACK_CHANNEL_NAME);
    }

    #[test]
    fn test_only_first_three_words_used() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");

        assert_eq!(namer.suggest_name("music memes movies and more", &feedback), "music-memes-movies");
    }

    #[test]
    fn test_truncated_to_exactly_ninety_chars() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");
        let message = format!("alpha beta {}", "z".repeat(200));

        let name = namer.suggest_name(&message, &feedback);
        assert_eq!(name.len(), MAX_CHANNEL_NAME_LEN);
        assert!(name.starts_with("alpha-beta-zzz"));
    }

    #[test]
    fn test_short_names_not_padded() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");
        assert_eq!(namer.suggest_name("rust", &feedback), "rust");
    }

    #[test]
    fn test_approved_feedback_overrides_slug() {
        let (_dir, mut feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");
        let message = "We should have a channel for Minecraft builds";

        assert_eq!(namer.suggest_name(message, &feedback), "channel-minecraft-builds");

        feedback.log_feedback(message.to_lowercase(), "mc-builds", Reaction::Up).unwrap();
        assert_eq!(namer.suggest_name(message, &feedback), "mc-builds");

        // Rejections never override.
        feedback.log_feedback(message, "bad-name", Reaction::Down).unwrap();
        assert_eq!(namer.suggest_name(message, &feedback), "mc-builds");
    }

    #[test]
    fn test_suggestion_is_deterministic() {
        let (_dir, feedback) = empty_feedback();
        let namer = ChannelNamer::new("melli");
        let message = "weekly standup notes";
        assert_eq!(namer.suggest_name(message, &feedback), namer.suggest_name(message, &feedback));
    }
}
