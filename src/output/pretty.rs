//! Colored console rendering of sessions and listings.

use colored::Colorize;

use crate::session::{format_hms, SessionRecord};
use crate::storage::SessionInfo;

/// Current terminal width in columns, falling back to 80.
#[must_use]
pub fn terminal_width() -> usize {
    crossterm::terminal::size().map_or(80, |(cols, _)| cols as usize)
}

/// A full-width bar of `=` characters.
#[must_use]
pub fn bar() -> String {
    "=".repeat(terminal_width())
}

/// A blue header line followed by a full-width bar.
///
/// When `center` is set the text is padded to the middle of the
/// terminal, as for banners.
#[must_use]
pub fn format_header(text: &str, center: bool) -> String {
    let width = terminal_width();
    let line = if center && text.len() < width {
        let pad = (width / 2).saturating_sub(text.len() / 2);
        format!("{}{}", " ".repeat(pad), text)
    } else {
        text.to_string()
    };
    format!("{}\n{}", line.blue(), bar())
}

/// Render a session's contents for the `show` command and for the
/// banner printed when an existing session is reopened.
#[must_use]
pub fn format_session(record: &SessionRecord) -> String {
    let mut out = Vec::new();
    out.push(format_header("Test Session Contents", true));

    if let Some(mission) = &record.mission {
        out.push(format!("{} {mission}", "Test Mission:".cyan()));
    }
    if let Some(timebox) = &record.timebox {
        out.push(format!("{} {timebox}", "Timebox:".cyan()));
    }
    if !record.areas.is_empty() {
        out.push("Test Areas:".cyan().to_string());
        for area in &record.areas {
            out.push(format!("- {area}"));
        }
    }
    out.push(bar());
    out.push(format_header("Test Session Log", true));

    if !record.log.is_empty() {
        for entry in &record.log {
            if entry.is_bug {
                out.push(
                    format!("{} (BUG) {}", entry.timestamp, entry.text)
                        .yellow()
                        .to_string(),
                );
            } else {
                out.push(format!("{}{}", entry.timestamp, entry.text));
            }
        }
        out.push(bar());
    }

    if let Some(debrief) = &record.debrief {
        out.push(format!("{} {debrief}", "Debrief:".cyan()));
    }
    let duration = record
        .duration()
        .map_or_else(|| "Not recorded".to_string(), format_hms);
    out.push(format!("{} {duration}", "Duration:".cyan()));

    out.join("\n")
}

/// Render the session listing: name left-aligned, modification time
/// right-aligned to the terminal width.
#[must_use]
pub fn format_session_list(sessions: &[SessionInfo]) -> String {
    if sessions.is_empty() {
        return "There are no recorded sessions".to_string();
    }

    let width = terminal_width();
    let mut out = vec![format_header("Test Sessions", false)];
    for session in sessions {
        let modified = session.modified.format("%a %b %e %H:%M:%S %Y").to_string();
        let pad = width
            .saturating_sub(session.name.len() + modified.len())
            .max(1);
        out.push(format!(
            "{}{}{}",
            session.name,
            " ".repeat(pad),
            modified.dimmed()
        ));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record() -> SessionRecord {
        let mut record = SessionRecord::default();
        record.mission = Some("Verify login".to_string());
        record.append_entry("[t1]", " note", false);
        record.append_entry("[t2]", "crash", true);
        record.set_duration(Duration::seconds(65));
        record
    }

    #[test]
    fn test_format_session_contains_fields() {
        colored::control::set_override(false);
        let text = format_session(&record());
        assert!(text.contains("Verify login"));
        assert!(text.contains("[t1] note"));
        assert!(text.contains("(BUG) crash"));
        assert!(text.contains("Duration: 0:01:05"));
    }

    #[test]
    fn test_format_session_without_duration() {
        colored::control::set_override(false);
        let text = format_session(&SessionRecord::default());
        assert!(text.contains("Duration: Not recorded"));
    }

    #[test]
    fn test_empty_list_notice() {
        assert_eq!(
            format_session_list(&[]),
            "There are no recorded sessions"
        );
    }
}
