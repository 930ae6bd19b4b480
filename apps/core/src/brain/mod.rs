//! # Brain Module
//!
//! Decides whether a message deserves its own channel, and what to call it.
//!
//! ## Components
//! - `vectorizer`: bag-of-words feature encoding over a fitted vocabulary
//! - `classifier`: ChannelNet channel-worthiness score
//! - `artifacts`: loading the trained vectorizer + model pair
//! - `naming`: channel name suggestion with feedback overrides

pub mod artifacts;
pub mod classifier;
pub mod naming;
pub mod vectorizer;

pub use artifacts::ClassifierArtifacts;
pub use classifier::{ChannelNet, CHANNEL_WORTHY_THRESHOLD};
pub use naming::{ChannelNamer, FALLBACK_CHANNEL_NAME, MAX_CHANNEL_NAME_LEN};
pub use vectorizer::Vectorizer;
