//! HTML report generation.
//!
//! Renders a session record into a standalone HTML file under the
//! reports directory, using an embedded template.

use std::path::PathBuf;

use minijinja::{context, Environment};

use crate::config::Paths;
use crate::error::RecorderError;
use crate::session::{format_hms, SessionRecord};

const TEMPLATE_NAME: &str = "report";
const TEMPLATE: &str = include_str!("report.html");

/// Renders session records to HTML report files.
pub struct ReportGenerator {
    reports_dir: PathBuf,
    env: Environment<'static>,
}

impl ReportGenerator {
    /// Create a generator writing to the default reports directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the reports directory cannot be created or
    /// the embedded template fails to parse.
    pub fn new() -> Result<Self, RecorderError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::with_dir(paths.reports)
    }

    /// Create a generator writing to a specific directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded template fails to parse.
    pub fn with_dir(reports_dir: PathBuf) -> Result<Self, RecorderError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| RecorderError::Report(format!("Invalid report template: {e}")))?;
        Ok(Self { reports_dir, env })
    }

    /// Render the record to `<reports_dir>/<file_name|session_name>.html`.
    ///
    /// Bug entries and plain notes are rendered as separate lists, each
    /// entry prefixed with its timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be
    /// written. Callers are expected to report the failure and keep
    /// their loop running.
    pub fn generate(
        &self,
        session_name: &str,
        record: &SessionRecord,
        file_name: Option<&str>,
    ) -> Result<PathBuf, RecorderError> {
        let test_log: Vec<String> = record
            .note_entries()
            .map(|e| format!("{}{}", e.timestamp, e.text))
            .collect();
        let bug_log: Vec<String> = record
            .bug_entries()
            .map(|e| format!("{} {}", e.timestamp, e.text))
            .collect();
        let duration = record.duration().map(format_hms);

        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| RecorderError::Report(e.to_string()))?;
        let html = template
            .render(context! {
                session_name,
                mission => &record.mission,
                timebox => &record.timebox,
                areas => &record.areas,
                duration,
                test_log,
                bug_log,
                debrief => &record.debrief,
            })
            .map_err(|e| RecorderError::Report(format!("Failed to render report: {e}")))?;

        std::fs::create_dir_all(&self.reports_dir)?;
        let stem = file_name.unwrap_or(session_name);
        let path = self.reports_dir.join(format!("{stem}.html"));
        std::fs::write(&path, html)
            .map_err(|e| RecorderError::Report(format!("Failed to write report: {e}")))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tempfile::TempDir;

    use super::*;

    fn sample_record() -> SessionRecord {
        let mut record = SessionRecord::default();
        record.mission = Some("Verify login".to_string());
        record.timebox = Some("90 minutes".to_string());
        record.areas = vec!["login".to_string(), "signup".to_string()];
        record.append_entry("[t1]", " entered credentials", false);
        record.append_entry("[t2]", "crash on submit", true);
        record.set_duration(Duration::seconds(3723));
        record.debrief = Some("Solid overall".to_string());
        record
    }

    #[test]
    fn test_generate_writes_session_fields() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path().to_path_buf()).unwrap();

        let path = generator.generate("S1", &sample_record(), None).unwrap();
        assert_eq!(path, dir.path().join("S1.html"));

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Verify login"));
        assert!(html.contains("90 minutes"));
        assert!(html.contains("login"));
        assert!(html.contains("[t1] entered credentials"));
        assert!(html.contains("[t2] crash on submit"));
        assert!(html.contains("1:02:03"));
        assert!(html.contains("Solid overall"));
    }

    #[test]
    fn test_generate_with_alternate_file_name() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path().to_path_buf()).unwrap();

        let path = generator
            .generate("S1", &sample_record(), Some("weekly"))
            .unwrap();
        assert_eq!(path, dir.path().join("weekly.html"));
    }

    #[test]
    fn test_empty_record_renders_placeholders() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path().to_path_buf()).unwrap();

        let path = generator
            .generate("empty", &SessionRecord::default(), None)
            .unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Not set"));
        assert!(html.contains("No log entries."));
        assert!(html.contains("No bugs raised."));
    }
}
