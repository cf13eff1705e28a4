//! The session command processor.
//!
//! Interprets one line of input per invocation against the in-session
//! command grammar, mutates the owned [`SessionRecord`], and flushes
//! every mutation to storage before returning (write-through). This is
//! the single place where session semantics live; the shell only
//! prints whatever the processor hands back.

use chrono::Duration;

use crate::error::RecorderError;
use crate::session::record::{parse_areas, SessionRecord};
use crate::session::timer::{format_hms, DurationTimer};
use crate::storage::SessionStore;

/// Prompt shown by the shell while a session is open.
pub const SESSION_PROMPT: &str = "SESSION >> ";

const QUIT_CMD: &str = "quit";
const BUG_CMD: &str = "bug";
const TIMEBOX_CMD: &str = "timebox";
const MISSION_CMD: &str = "mission";
const SCREENSHOT_CMD: &str = "screenshot";
const UNDO_CMD: &str = "undo";
const AREAS_CMD: &str = "areas";
const PAUSE_CMD: &str = "pause";
const DURATION_CMD: &str = "duration";
const HELP_CMD: &str = "help";

/// Help text for one in-session command.
pub struct CommandHelp {
    /// Command keyword.
    pub name: &'static str,
    /// Usage line, e.g. `bug [description]`.
    pub usage: &'static str,
    /// One-line description.
    pub description: &'static str,
}

impl CommandHelp {
    /// Detailed usage string returned by `help <name>`.
    #[must_use]
    pub fn detail(&self) -> String {
        format!("{}\n        {}", self.usage, self.description)
    }
}

/// Recognized in-session commands, in help enumeration order.
pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: BUG_CMD,
        usage: "bug [description]",
        description: "Record a bug with the given description",
    },
    CommandHelp {
        name: MISSION_CMD,
        usage: "mission [statement]",
        description: "Set the test mission",
    },
    CommandHelp {
        name: TIMEBOX_CMD,
        usage: "timebox [time_value]",
        description: "Set the test timebox",
    },
    CommandHelp {
        name: PAUSE_CMD,
        usage: "pause",
        description: "Pause the session; it resumes on the next entry",
    },
    CommandHelp {
        name: DURATION_CMD,
        usage: "duration",
        description: "Show the current session duration",
    },
    CommandHelp {
        name: UNDO_CMD,
        usage: "undo",
        description: "Undo the last session entry",
    },
    CommandHelp {
        name: AREAS_CMD,
        usage: "areas [area1, area2]",
        description: "Set the list of test areas",
    },
    CommandHelp {
        name: SCREENSHOT_CMD,
        usage: "screenshot",
        description: "Take a screenshot of the current display [NOT IMPLEMENTED]",
    },
    CommandHelp {
        name: HELP_CMD,
        usage: "help [command]",
        description: "Display command usage and description",
    },
    CommandHelp {
        name: QUIT_CMD,
        usage: "quit",
        description: "End the session, optionally recording a debrief",
    },
];

/// Look up a command's help entry by name.
#[must_use]
pub fn find_command(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// What the shell should do after processing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep the session open; show the text, if any.
    Continue(Option<String>),
    /// The session has ended and its record is saved; show the text, if any.
    EndSession(Option<String>),
}

/// Interactive confirmation collaborator.
///
/// The shell backs this with stdin; tests use a scripted implementation.
pub trait Prompter {
    /// Ask a yes/no question; `true` means yes.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Ask for a line of free text.
    fn ask(&mut self, prompt: &str) -> String;
}

/// Owns one open session: its record, its timer, and its store handle.
pub struct SessionProcessor {
    name: String,
    store: SessionStore,
    record: SessionRecord,
    timer: DurationTimer,
}

impl SessionProcessor {
    /// Open the named session, creating a fresh record if none exists.
    ///
    /// The timer starts immediately, carrying over any duration a
    /// previous run of this session recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the session name is invalid or an existing
    /// session file cannot be read.
    pub fn open(store: SessionStore, name: &str) -> Result<Self, RecorderError> {
        let record = store.load_or_default(name)?;
        let initial = record.duration().unwrap_or_else(Duration::zero);
        Ok(Self {
            name: name.to_string(),
            store,
            record,
            timer: DurationTimer::with_initial(initial),
        })
    }

    /// The session name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The in-memory session record.
    #[must_use]
    pub const fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Whether the session clock is currently paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Live elapsed duration from the timer.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.timer.get_duration()
    }

    /// Process one line of in-session input.
    ///
    /// Never panics and never returns an error: every failure is
    /// converted into a [`Outcome::Continue`] whose text communicates
    /// the problem, so the shell's loop stays usable.
    pub fn process(&mut self, timestamp: &str, line: &str, prompter: &mut dyn Prompter) -> Outcome {
        // Any activity resumes the clock.
        if self.timer.is_paused() {
            self.timer.unpause();
        }
        match self.dispatch(timestamp, line, prompter) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Continue(Some(e.to_string())),
        }
    }

    /// Classify and execute one line.
    ///
    /// Prefix matches run against the raw line, so a note beginning
    /// with a reserved word is always captured as that command. A
    /// known limitation, kept for predictability.
    fn dispatch(
        &mut self,
        timestamp: &str,
        line: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<Outcome, RecorderError> {
        let trimmed = line.trim_end();

        if trimmed == QUIT_CMD {
            if prompter.confirm("Would you like to record a debrief? (y/N)") {
                self.record.debrief = Some(prompter.ask("Debrief: "));
            }
            self.record.set_duration(self.timer.get_duration());
            self.flush()?;
            return Ok(Outcome::EndSession(None));
        }

        if let Some(rest) = line.strip_prefix(BUG_CMD) {
            let text = rest.strip_prefix(' ').unwrap_or(rest);
            self.record.append_entry(timestamp, text, true);
            self.flush()?;
            return Ok(Outcome::Continue(Some("Bug data captured".to_string())));
        }

        if let Some(rest) = line.strip_prefix(TIMEBOX_CMD) {
            self.record.timebox = Some(rest.trim().to_string());
            self.flush()?;
            return Ok(Outcome::Continue(Some("Test time box saved".to_string())));
        }

        if let Some(rest) = line.strip_prefix(MISSION_CMD) {
            self.record.mission = Some(rest.trim().to_string());
            self.flush()?;
            return Ok(Outcome::Continue(Some("Test mission saved".to_string())));
        }

        if trimmed == SCREENSHOT_CMD {
            // Stub: acknowledged but unimplemented.
            return Ok(Outcome::Continue(Some(
                "screenshot is not implemented yet".to_string(),
            )));
        }

        if trimmed == UNDO_CMD {
            self.record.undo()?;
            self.flush()?;
            return Ok(Outcome::Continue(Some("Last entry removed".to_string())));
        }

        if let Some(rest) = line.strip_prefix(AREAS_CMD) {
            self.record.areas = parse_areas(rest);
            self.flush()?;
            return Ok(Outcome::Continue(Some("Test areas saved".to_string())));
        }

        if trimmed == PAUSE_CMD {
            self.timer.pause();
            return Ok(Outcome::Continue(Some("Session paused".to_string())));
        }

        if trimmed == DURATION_CMD {
            let text = format!("Duration: {}", format_hms(self.timer.get_duration()));
            return Ok(Outcome::Continue(Some(text)));
        }

        if trimmed == HELP_CMD {
            return Ok(Outcome::Continue(Some(help_listing())));
        }

        if let Some(rest) = line.strip_prefix(HELP_CMD) {
            let topic = rest.trim();
            let text = find_command(topic).map_or_else(
                || format!("{topic} command does not exist"),
                CommandHelp::detail,
            );
            return Ok(Outcome::Continue(Some(text)));
        }

        // Plain note. The leading space preserves the original line's
        // formatting when rendered after its timestamp.
        self.record
            .append_entry(timestamp, &format!(" {line}"), false);
        self.flush()?;
        Ok(Outcome::Continue(None))
    }

    /// Write the record through to storage.
    fn flush(&self) -> Result<(), RecorderError> {
        self.store.save(&self.name, &self.record)
    }
}

/// Fixed-order listing of every in-session command.
fn help_listing() -> String {
    COMMANDS
        .iter()
        .map(|c| format!("{:<12}{}", c.name, c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use tempfile::TempDir;

    use super::*;

    /// Prompter with canned answers for quit-time debrief capture.
    struct ScriptedPrompter {
        confirms: VecDeque<bool>,
        answers: VecDeque<String>,
    }

    impl ScriptedPrompter {
        fn declining() -> Self {
            Self {
                confirms: VecDeque::from([false]),
                answers: VecDeque::new(),
            }
        }

        fn with_debrief(text: &str) -> Self {
            Self {
                confirms: VecDeque::from([true]),
                answers: VecDeque::from([text.to_string()]),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.confirms.pop_front().unwrap_or(false)
        }

        fn ask(&mut self, _prompt: &str) -> String {
            self.answers.pop_front().unwrap_or_default()
        }
    }

    fn open_session(dir: &TempDir) -> SessionProcessor {
        let store = SessionStore::with_dir(dir.path().to_path_buf());
        SessionProcessor::open(store, "TestSession").unwrap()
    }

    fn continue_text(outcome: Outcome) -> Option<String> {
        match outcome {
            Outcome::Continue(text) => text,
            Outcome::EndSession(_) => panic!("session ended unexpectedly"),
        }
    }

    #[test]
    fn test_fresh_session_has_no_duration() {
        let dir = TempDir::new().unwrap();
        let session = open_session(&dir);
        assert!(session.record().duration_seconds.is_none());
    }

    #[test]
    fn test_bug_command_records_entry() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let outcome = session.process("[t]", "bug Crash on submit", &mut prompter);
        assert_eq!(continue_text(outcome).as_deref(), Some("Bug data captured"));

        let entry = &session.record().log[0];
        assert!(entry.is_bug);
        assert_eq!(entry.text, "Crash on submit");
        assert_eq!(entry.timestamp, "[t]");
    }

    #[test]
    fn test_plain_note_gets_leading_space() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let outcome = session.process("[t]", "Entered credentials", &mut prompter);
        assert_eq!(continue_text(outcome), None);

        let entry = &session.record().log[0];
        assert!(!entry.is_bug);
        assert_eq!(entry.text, " Entered credentials");
    }

    #[test]
    fn test_mission_and_timebox_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        session.process("[t]", "mission Verify login", &mut prompter);
        session.process("[t]", "timebox 90 minutes", &mut prompter);

        assert_eq!(session.record().mission.as_deref(), Some("Verify login"));
        assert_eq!(session.record().timebox.as_deref(), Some("90 minutes"));
    }

    #[test]
    fn test_areas_replaced_wholesale() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        session.process("[t]", "areas a, b ,, c", &mut prompter);
        assert_eq!(session.record().areas, vec!["a", "b", "c"]);

        session.process("[t]", "areas login", &mut prompter);
        assert_eq!(session.record().areas, vec!["login"]);
    }

    #[test]
    fn test_undo_twice_on_single_entry() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        session.process("[t]", "only entry", &mut prompter);

        let first = session.process("[t]", "undo", &mut prompter);
        assert_eq!(continue_text(first).as_deref(), Some("Last entry removed"));

        let second = session.process("[t]", "undo", &mut prompter);
        assert_eq!(continue_text(second).as_deref(), Some("No entries to undo"));
        assert!(session.record().log.is_empty());
    }

    #[test]
    fn test_screenshot_is_a_stub() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let outcome = session.process("[t]", "screenshot", &mut prompter);
        assert_eq!(
            continue_text(outcome).as_deref(),
            Some("screenshot is not implemented yet")
        );
        assert!(session.record().log.is_empty());
    }

    #[test]
    fn test_help_lists_all_commands_in_order() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let text = continue_text(session.process("[t]", "help", &mut prompter)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), COMMANDS.len());
        for (line, command) in lines.iter().zip(COMMANDS) {
            assert!(line.starts_with(command.name));
        }
    }

    #[test]
    fn test_help_topic_returns_usage() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let text = continue_text(session.process("[t]", "help mission", &mut prompter)).unwrap();
        assert_eq!(text, "mission [statement]\n        Set the test mission");
    }

    #[test]
    fn test_help_unknown_topic() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let text = continue_text(session.process("[t]", "help bogus", &mut prompter)).unwrap();
        assert_eq!(text, "bogus command does not exist");
    }

    #[test]
    fn test_pause_and_duration_commands() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        let outcome = session.process("[t]", "pause", &mut prompter);
        assert_eq!(continue_text(outcome).as_deref(), Some("Session paused"));
        assert!(session.is_paused());

        // Any input resumes the clock before dispatch.
        let text = continue_text(session.process("[t]", "duration", &mut prompter)).unwrap();
        assert!(text.starts_with("Duration: "));
        assert!(!session.is_paused());
    }

    #[test]
    fn test_note_beginning_with_keyword_is_captured() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        session.process("[t]", "bugfix looked wrong", &mut prompter);
        let entry = &session.record().log[0];
        assert!(entry.is_bug);
        assert_eq!(entry.text, "fix looked wrong");
    }

    #[test]
    fn test_write_through_persistence() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        session.process("[t]", "mission Verify login", &mut prompter);

        // A second store handle sees the mutation before the session ends.
        let store = SessionStore::with_dir(dir.path().to_path_buf());
        let on_disk = store.load("TestSession").unwrap();
        assert_eq!(on_disk.mission.as_deref(), Some("Verify login"));
    }

    #[test]
    fn test_quit_declining_debrief() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::declining();

        session.process("[t]", "mission Verify login", &mut prompter);
        session.process("[t]", "Entered credentials", &mut prompter);
        session.process("[t]", "bug Crash on submit", &mut prompter);

        let outcome = session.process("[t]", "quit", &mut prompter);
        assert_eq!(outcome, Outcome::EndSession(None));

        let store = SessionStore::with_dir(dir.path().to_path_buf());
        let record = store.load("TestSession").unwrap();
        assert_eq!(record.mission.as_deref(), Some("Verify login"));
        assert_eq!(record.log.len(), 2);
        assert_eq!(record.bug_entries().count(), 1);
        assert_eq!(record.note_entries().count(), 1);
        assert!(record.duration_seconds.is_some());
        assert!(record.debrief.is_none());
    }

    #[test]
    fn test_quit_with_debrief() {
        let dir = TempDir::new().unwrap();
        let mut session = open_session(&dir);
        let mut prompter = ScriptedPrompter::with_debrief("Login flow is solid");

        let outcome = session.process("[t]", "quit", &mut prompter);
        assert_eq!(outcome, Outcome::EndSession(None));

        let store = SessionStore::with_dir(dir.path().to_path_buf());
        let record = store.load("TestSession").unwrap();
        assert_eq!(record.debrief.as_deref(), Some("Login flow is solid"));
    }

    #[test]
    fn test_reopen_carries_duration_forward() {
        let dir = TempDir::new().unwrap();
        {
            let mut session = open_session(&dir);
            let mut prompter = ScriptedPrompter::declining();
            session.process("[t]", "quit", &mut prompter);
        }

        // Seed a nonzero recorded duration, then reopen.
        let store = SessionStore::with_dir(dir.path().to_path_buf());
        let mut record = store.load("TestSession").unwrap();
        record.duration_seconds = Some(600);
        store.save("TestSession", &record).unwrap();

        let reopened = open_session(&dir);
        assert!(reopened.elapsed() >= chrono::Duration::seconds(600));
    }
}
