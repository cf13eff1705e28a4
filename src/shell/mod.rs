//! The interactive shell.
//!
//! A rustyline REPL that dispatches top-level commands
//! (`new/open/show/list/report/delete/help/quit`) and, while a session
//! is open, feeds every line to the session processor. Per-command
//! failures are printed and the loop continues; only readline errors
//! terminate the shell.

mod helper;

pub use helper::{ShellHelper, SHELL_COMMANDS};

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::cli::commands;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output::{bar, format_header, format_session};
use crate::report::ReportGenerator;
use crate::session::{format_hms, Outcome, Prompter, SessionProcessor, SESSION_PROMPT};
use crate::storage::SessionStore;

const DEFAULT_PROMPT: &str = ">> ";

/// Prompter backed by stdin, used for debrief and delete confirmation.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&mut self, prompt: &str) -> bool {
        println!("{prompt}");
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn ask(&mut self, prompt: &str) -> String {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return String::new();
        }
        line.trim_end_matches(['\r', '\n']).to_string()
    }
}

/// Run the interactive shell until the operator quits.
///
/// # Errors
///
/// Returns an error only if the line editor itself fails; command
/// failures are reported inline.
pub fn run(store: SessionStore, generator: ReportGenerator, config: &Config) -> Result<()> {
    let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new(store.clone())));

    println!("{}", format_header("Test Session Recorder", true));
    println!("Type 'help' for available commands.");

    let mut session: Option<SessionProcessor> = None;

    loop {
        let prompt = if session.is_some() {
            SESSION_PROMPT
        } else {
            DEFAULT_PROMPT
        };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        if let Some(active) = session.as_mut() {
            let timestamp = Local::now()
                .format(&config.session.timestamp_format)
                .to_string();
            match active.process(&timestamp, &line, &mut StdinPrompter) {
                Outcome::Continue(Some(text)) => println!("{text}"),
                Outcome::Continue(None) => {}
                Outcome::EndSession(text) => {
                    if let Some(text) = text {
                        println!("{text}");
                    }
                    let duration = active
                        .record()
                        .duration()
                        .map_or_else(|| "0:00:00".to_string(), format_hms);
                    println!("Session Duration: {duration}");
                    println!("Session saved.");
                    session = None;
                }
            }
        } else {
            match dispatch(&store, &generator, &line) {
                Action::None => {}
                Action::Quit => break,
                Action::OpenSession(processor) => session = Some(processor),
            }
        }
    }

    Ok(())
}

/// What a top-level command asks the loop to do next.
enum Action {
    None,
    Quit,
    OpenSession(SessionProcessor),
}

fn dispatch(store: &SessionStore, generator: &ReportGenerator, line: &str) -> Action {
    let trimmed = line.trim();
    let (cmd, rest) = trimmed
        .split_once(' ')
        .map_or((trimmed, ""), |(c, r)| (c, r.trim()));

    match cmd {
        "new" => {
            if rest.is_empty() {
                println!("Test session must have a name or title");
                Action::None
            } else if store.exists(rest) {
                println!(
                    "This test session already exists. Please try again with a different title"
                );
                Action::None
            } else {
                open_session(store, rest, true)
            }
        }
        "open" => {
            if rest.is_empty() {
                println!("Please specify a test session to open");
                Action::None
            } else {
                // A missing name silently starts a new session.
                open_session(store, rest, !store.exists(rest))
            }
        }
        "show" => {
            match store.load(rest) {
                Ok(record) => println!("{}", format_session(&record)),
                Err(e) => println!("{e}"),
            }
            Action::None
        }
        "list" => {
            match commands::list(store, OutputFormat::Pretty) {
                Ok(text) => println!("{text}"),
                Err(e) => println!("{e}"),
            }
            Action::None
        }
        "report" => {
            let (name, file) = rest
                .split_once("-f")
                .map_or((rest, None), |(n, f)| (n.trim(), Some(f.trim())));
            if name.is_empty() {
                println!("Please enter a valid session name");
            } else {
                match commands::report(store, generator, name, file) {
                    Ok(text) => println!("{text}"),
                    Err(e) => println!("Report failed to generate: {e}"),
                }
            }
            Action::None
        }
        "delete" => {
            if rest.is_empty() {
                println!("Please enter a valid session name");
            } else {
                match commands::delete(store, &mut StdinPrompter, rest, false) {
                    Ok(text) if !text.is_empty() => println!("{text}"),
                    Ok(_) => {}
                    Err(e) => println!("{e}"),
                }
            }
            Action::None
        }
        "help" => {
            println!("{}", top_level_help());
            Action::None
        }
        "quit" => Action::Quit,
        _ => {
            println!("Please enter a valid command");
            Action::None
        }
    }
}

/// Open a session and print the appropriate banner.
fn open_session(store: &SessionStore, name: &str, is_new: bool) -> Action {
    if !is_new {
        println!("{}", format_header(&format!("Session Opened - {name}"), false));
        match store.load(name) {
            Ok(record) => println!("{}", format_session(&record)),
            Err(e) => {
                println!("{e}");
                return Action::None;
            }
        }
    }
    match SessionProcessor::open(store.clone(), name) {
        Ok(processor) => {
            if is_new {
                println!("Session Started: {name}");
                println!("{}", bar());
            }
            Action::OpenSession(processor)
        }
        Err(e) => {
            println!("{e}");
            Action::None
        }
    }
}

fn top_level_help() -> String {
    let entries: &[(&str, &str)] = &[
        ("new [name]", "Create a new test session"),
        ("open [name]", "Open a session, creating it if missing"),
        ("show [name]", "Show the contents of a session"),
        ("list", "List all test sessions"),
        ("report [name] -f [file]", "Generate an HTML report"),
        ("delete [name]", "Permanently delete a session"),
        ("help", "Display this listing"),
        ("quit", "Quit the application"),
    ];
    entries
        .iter()
        .map(|(usage, description)| format!("{}  {description}", format!("{usage:<24}").bold()))
        .collect::<Vec<_>>()
        .join("\n")
}
