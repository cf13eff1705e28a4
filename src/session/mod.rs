//! Session core: the command processor, its duration timer, and the
//! persisted record they maintain.

pub mod processor;
pub mod record;
pub mod timer;

pub use processor::{
    find_command, CommandHelp, Outcome, Prompter, SessionProcessor, COMMANDS, SESSION_PROMPT,
};
pub use record::{parse_areas, LogEntry, SessionRecord};
pub use timer::{format_hms, DurationTimer};
