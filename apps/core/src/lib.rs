// Melli V2 Core
// Decides when a message deserves its own channel, names it, and learns
// from emoji feedback.

pub mod actors;
pub mod brain;
pub mod config;
pub mod console;
pub mod cooldown;
pub mod error;
pub mod feedback;
pub mod fs_manager;
pub mod models;
pub mod mood;
pub mod preflight;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod workflow;

pub use error::{AppError, Result};

#[cfg(test)]
mod tests;
