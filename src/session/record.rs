//! The persisted data model for a test session.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::RecorderError;

/// One timestamped note or bug report captured during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp string as produced by the shell, e.g. `[2026-08-27 10:15:00]`.
    pub timestamp: String,
    /// Entry text. Plain notes carry a single leading space.
    pub text: String,
    /// Whether this entry was recorded with the `bug` command.
    pub is_bug: bool,
}

/// Everything persisted for one named session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    /// Ordered log; insertion order defines chronological and undo order.
    pub log: Vec<LogEntry>,
    /// Test mission statement.
    pub mission: Option<String>,
    /// Target duration, informational free text.
    pub timebox: Option<String>,
    /// Test areas, replaced wholesale by the `areas` command.
    pub areas: Vec<String>,
    /// Accumulated elapsed seconds, set only at session end.
    pub duration_seconds: Option<i64>,
    /// Closing summary captured at quit time.
    pub debrief: Option<String>,
}

impl SessionRecord {
    /// Append a log entry.
    pub fn append_entry(&mut self, timestamp: &str, text: &str, is_bug: bool) {
        self.log.push(LogEntry {
            timestamp: timestamp.to_string(),
            text: text.to_string(),
            is_bug,
        });
    }

    /// Remove and return the most recently appended entry.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::EmptyLog`] if the log is empty; the
    /// record is left unchanged.
    pub fn undo(&mut self) -> Result<LogEntry, RecorderError> {
        self.log.pop().ok_or(RecorderError::EmptyLog)
    }

    /// Accumulated duration, if one was recorded.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_seconds.map(Duration::seconds)
    }

    /// Record the final duration (whole seconds).
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_seconds = Some(duration.num_seconds());
    }

    /// Entries recorded with the `bug` command.
    pub fn bug_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().filter(|e| e.is_bug)
    }

    /// Plain note entries.
    pub fn note_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().filter(|e| !e.is_bug)
    }
}

/// Parse an `areas` command argument into a list of areas.
///
/// Splits on commas, trims each token, and drops empty tokens.
/// Duplicates are kept.
#[must_use]
pub fn parse_areas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = SessionRecord::default();
        assert!(record.log.is_empty());
        assert!(record.mission.is_none());
        assert!(record.timebox.is_none());
        assert!(record.areas.is_empty());
        assert!(record.duration_seconds.is_none());
        assert!(record.debrief.is_none());
    }

    #[test]
    fn test_undo_pops_most_recent() {
        let mut record = SessionRecord::default();
        record.append_entry("[t1]", " first", false);
        record.append_entry("[t2]", "second", true);

        let popped = record.undo().unwrap();
        assert_eq!(popped.text, "second");
        assert!(popped.is_bug);
        assert_eq!(record.log.len(), 1);
    }

    #[test]
    fn test_undo_empty_log_is_error() {
        let mut record = SessionRecord::default();
        record.append_entry("[t1]", " only", false);
        assert!(record.undo().is_ok());
        assert!(matches!(record.undo(), Err(RecorderError::EmptyLog)));
        assert!(record.log.is_empty());
    }

    #[test]
    fn test_parse_areas_normalizes() {
        assert_eq!(parse_areas(" a, b ,, c"), vec!["a", "b", "c"]);
        assert_eq!(parse_areas(""), Vec::<String>::new());
        assert_eq!(parse_areas(" , ,"), Vec::<String>::new());
        // Duplicates are deliberately kept.
        assert_eq!(parse_areas("login,login"), vec!["login", "login"]);
    }

    #[test]
    fn test_duration_round_trip() {
        let mut record = SessionRecord::default();
        assert!(record.duration().is_none());
        record.set_duration(Duration::seconds(321));
        assert_eq!(record.duration(), Some(Duration::seconds(321)));
    }

    #[test]
    fn test_entry_partition() {
        let mut record = SessionRecord::default();
        record.append_entry("[t1]", " note", false);
        record.append_entry("[t2]", "crash", true);
        record.append_entry("[t3]", " another note", false);

        assert_eq!(record.bug_entries().count(), 1);
        assert_eq!(record.note_entries().count(), 2);
    }
}
