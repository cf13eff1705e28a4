//! Error types for sessrec.

use thiserror::Error;

/// All errors that can occur in sessrec.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// Session storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The named session does not exist.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// The session name cannot be used as a file name.
    #[error("Invalid session name: {0}")]
    InvalidName(String),

    /// `undo` was issued against an empty session log.
    #[error("No entries to undo")]
    EmptyLog,

    /// Report rendering or writing failed.
    #[error("Report error: {0}")]
    Report(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session data could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
