//! Session storage.
//!
//! Sessions are stored as individual JSON files in the sessions
//! directory (`~/.sessrec/sessions/` by default), one file per named
//! session. The layout is an implementation detail of this module;
//! the rest of the crate only sees [`SessionRecord`] values.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::Paths;
use crate::error::RecorderError;
use crate::session::SessionRecord;

const SESSION_EXT: &str = "json";

/// A stored session's name and last-modified time, for listings.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Session name (file stem).
    pub name: String,
    /// Last modification time of the session file.
    pub modified: DateTime<Local>,
}

/// File-backed store for session records.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions_dir: PathBuf,
}

impl SessionStore {
    /// Create a store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions directory cannot be created.
    pub fn new() -> Result<Self, RecorderError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Ok(Self {
            sessions_dir: paths.sessions,
        })
    }

    /// Create a store over a specific directory.
    ///
    /// The directory is created on first save if it does not exist.
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { sessions_dir: dir }
    }

    /// Validate a session name and resolve its file path.
    fn session_path(&self, name: &str) -> Result<PathBuf, RecorderError> {
        validate_name(name)?;
        Ok(self.sessions_dir.join(format!("{name}.{SESSION_EXT}")))
    }

    /// Check whether a session with this name exists.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.session_path(name).is_ok_and(|p| p.exists())
    }

    /// Load the named session.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NotFound`] if no such session exists,
    /// or a storage error if the file cannot be read or parsed.
    pub fn load(&self, name: &str) -> Result<SessionRecord, RecorderError> {
        let path = self.session_path(name)?;
        if !path.exists() {
            return Err(RecorderError::NotFound(name.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| RecorderError::Storage(format!("Failed to parse session {name}: {e}")))
    }

    /// Load the named session, or a fresh default record if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an existing file
    /// cannot be read.
    pub fn load_or_default(&self, name: &str) -> Result<SessionRecord, RecorderError> {
        match self.load(name) {
            Ok(record) => Ok(record),
            Err(RecorderError::NotFound(_)) => Ok(SessionRecord::default()),
            Err(e) => Err(e),
        }
    }

    /// Write the record for the named session (write-through).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the file cannot be
    /// written.
    pub fn save(&self, name: &str, record: &SessionRecord) -> Result<(), RecorderError> {
        let path = self.session_path(name)?;
        std::fs::create_dir_all(&self.sessions_dir)?;
        let content = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, content)
            .map_err(|e| RecorderError::Storage(format!("Failed to save session {name}: {e}")))
    }

    /// List all stored sessions, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions directory cannot be read.
    pub fn list(&self) -> Result<Vec<SessionInfo>, RecorderError> {
        if !self.sessions_dir.exists() {
            return Ok(Vec::new());
        }
        let mut sessions = Vec::new();
        for entry in std::fs::read_dir(&self.sessions_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SESSION_EXT) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .map(DateTime::<Local>::from)
                .unwrap_or_else(|_| Local::now());
            sessions.push(SessionInfo {
                name: name.to_string(),
                modified,
            });
        }
        sessions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sessions)
    }

    /// Permanently delete the named session.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NotFound`] if no such session exists.
    pub fn delete(&self, name: &str) -> Result<(), RecorderError> {
        let path = self.session_path(name)?;
        if !path.exists() {
            return Err(RecorderError::NotFound(name.to_string()));
        }
        std::fs::remove_file(&path)
            .map_err(|e| RecorderError::Storage(format!("Failed to delete session {name}: {e}")))
    }
}

/// Reject names that cannot be used as a session file name.
fn validate_name(name: &str) -> Result<(), RecorderError> {
    if name.trim().is_empty() {
        return Err(RecorderError::InvalidName(
            "name must not be empty".to_string(),
        ));
    }
    if name.starts_with('.') {
        return Err(RecorderError::InvalidName(name.to_string()));
    }
    if name.chars().any(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(RecorderError::InvalidName(name.to_string()));
    }
    Ok(())
}
