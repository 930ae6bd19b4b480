use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents JSON (de)serialization errors on the persisted state files.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A classifier or vectorizer artifact is missing, corrupt or inconsistent.
    /// Always fatal at startup.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// An outbound call to the chat platform failed (permissions, network...).
    #[error("Platform error: {0}")]
    Platform(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents failures of the supervisor mailbox (closed channel, dropped responder).
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl AppError {
    /// Errors the process must not start (or keep running) with.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Artifact(_) | AppError::Config(_))
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Json(e) => AppError::Validation(format!("JSON error: {}", e)),
            AppError::Artifact(s) => AppError::Artifact(s.clone()),
            AppError::Platform(s) => AppError::Platform(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
            AppError::Actor(s) => AppError::Actor(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(err.to_string())
    }
}

impl From<bincode::Error> for AppError {
    fn from(err: bincode::Error) -> Self {
        AppError::Artifact(format!("Decode error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
