//! Error types for storage, notification and input validation

use thiserror::Error;

/// Result alias for storage backend operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reading or writing the persisted timer collection
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised by a completion notification sink
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to spawn notification command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Notification command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
}

/// User-facing validation failures for the create and edit forms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a timer name")]
    EmptyName,

    #[error("Please set a duration for the timer")]
    ZeroDuration,

    #[error("Timer duration is too long")]
    DurationTooLong,
}
