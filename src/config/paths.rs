//! Path resolution for sessrec data files.
//!
//! All sessrec data is stored in `~/.sessrec/`:
//! - `config.yaml` - Main configuration file
//! - `sessions/` - Recorded sessions (one JSON file each)
//! - `reports/` - Generated HTML reports

use std::path::PathBuf;

use crate::error::RecorderError;

/// Paths to sessrec configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.sessrec/`
    pub root: PathBuf,
    /// Config file: `~/.sessrec/config.yaml`
    pub config_file: PathBuf,
    /// Sessions directory: `~/.sessrec/sessions/`
    pub sessions: PathBuf,
    /// Reports directory: `~/.sessrec/reports/`
    pub reports: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RecorderError> {
        let home = std::env::var("HOME")
            .map_err(|_| RecorderError::Config("Could not determine home directory".to_string()))?;
        Ok(Self::with_root(PathBuf::from(home).join(".sessrec")))
    }

    /// Create paths under a specific root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            sessions: root.join("sessions"),
            reports: root.join("reports"),
            root,
        }
    }

    /// Create all data directories if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<(), RecorderError> {
        std::fs::create_dir_all(&self.sessions)?;
        std::fs::create_dir_all(&self.reports)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_with_root_layout() {
        let paths = Paths::with_root(PathBuf::from("/tmp/x"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/x/config.yaml"));
        assert_eq!(paths.sessions, PathBuf::from("/tmp/x/sessions"));
        assert_eq!(paths.reports, PathBuf::from("/tmp/x/reports"));
    }

    #[test]
    fn test_ensure_dirs() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join("data"));
        paths.ensure_dirs().unwrap();
        assert!(paths.sessions.is_dir());
        assert!(paths.reports.is_dir());
    }
}
