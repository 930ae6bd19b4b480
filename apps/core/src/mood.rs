//! Mood: a bounded score nudged by feedback, driving the bot's reply tone.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MOOD_MIN: i32 = -10;
pub const MOOD_MAX: i32 = 10;

/// Above this mood the positive phrases gain a bonus entry.
const ELATED_ABOVE: i32 = 5;
/// Below this mood the negative phrases gain a bonus entry.
const GRUMPY_BELOW: i32 = -5;

pub const POSITIVE_PHRASES: &[&str] = &[
    "Yay! I did it! :3",
    "A treat?! Thanks! 🍉",
    "I’m the best, right? 😸",
    "Feeling awesome! 😎",
];
pub const POSITIVE_BONUS: &str = "I feel unstoppable! 💪";

pub const NEGATIVE_PHRASES: &[&str] = &[
    "Ouch! That hurt… 😿",
    "Slap! Not nice… 😵",
    "I’ll do better next time… 🙁",
    "Why did you do that?! 😾",
];
pub const NEGATIVE_BONUS: &str = "I’m feeling grumpy… 😾";

/// Mood score, always within [`MOOD_MIN`, `MOOD_MAX`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Mood(i32);

impl Mood {
    pub fn new(value: i32) -> Self {
        Self(value.clamp(MOOD_MIN, MOOD_MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// One step up on success, one step down otherwise, clamped.
    pub fn adjusted(self, success: bool) -> Self {
        let delta = if success { 1 } else { -1 };
        Self::new(self.0.saturating_add(delta))
    }

    pub fn is_positive(self) -> bool {
        self.0 >= 0
    }

    /// Candidate replies for the current mood, in a fixed order.
    pub fn phrases(self) -> Vec<&'static str> {
        if self.is_positive() {
            let mut phrases = POSITIVE_PHRASES.to_vec();
            if self.0 > ELATED_ABOVE {
                phrases.push(POSITIVE_BONUS);
            }
            phrases
        } else {
            let mut phrases = NEGATIVE_PHRASES.to_vec();
            if self.0 < GRUMPY_BELOW {
                phrases.push(NEGATIVE_BONUS);
            }
            phrases
        }
    }

    /// Picks a reply for the current mood with `selector`.
    pub fn response_text(self, selector: &mut dyn PhraseSelector) -> &'static str {
        let phrases = self.phrases();
        let index = selector.select(phrases.len()).min(phrases.len() - 1);
        phrases[index]
    }
}

impl From<i32> for Mood {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Mood> for i32 {
    fn from(mood: Mood) -> Self {
        mood.0
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chooses an index into a non-empty phrase list.
pub trait PhraseSelector: Send {
    fn select(&mut self, len: usize) -> usize;
}

/// Uniform random choice.
#[derive(Debug, Default)]
pub struct RandomSelector;

impl PhraseSelector for RandomSelector {
    fn select(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same position (clamped to the last phrase).
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl PhraseSelector for FixedSelector {
    fn select(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
