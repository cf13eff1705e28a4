//! One-shot command implementations.
//!
//! These mirror the shell's read-only and destructive commands for
//! non-interactive use; the interactive session loop lives in
//! [`crate::shell`].

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, OutputFormat};
use crate::error::RecorderError;
use crate::output::{format_session, format_session_list, to_json};
use crate::report::ReportGenerator;
use crate::session::Prompter;
use crate::storage::SessionStore;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the sessions directory cannot be read.
pub fn list(store: &SessionStore, format: OutputFormat) -> Result<String, RecorderError> {
    let sessions = store.list()?;
    match format {
        OutputFormat::Json => {
            let names: Vec<&str> = sessions.iter().map(|s| s.name.as_str()).collect();
            to_json(&names)
        }
        OutputFormat::Pretty => Ok(format_session_list(&sessions)),
    }
}

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the session does not exist or cannot be read.
pub fn show(store: &SessionStore, name: &str, format: OutputFormat) -> Result<String, RecorderError> {
    let record = store.load(name)?;
    match format {
        OutputFormat::Json => to_json(&record),
        OutputFormat::Pretty => Ok(format_session(&record)),
    }
}

/// Execute the report command.
///
/// # Errors
///
/// Returns an error if the session does not exist or the report cannot
/// be generated.
pub fn report(
    store: &SessionStore,
    generator: &ReportGenerator,
    name: &str,
    file: Option<&str>,
) -> Result<String, RecorderError> {
    let record = store.load(name)?;
    let path = generator.generate(name, &record, file)?;
    Ok(format!("Report successfully generated: {}", path.display()))
}

/// Execute the delete command, confirming through `prompter` unless
/// `force` is set.
///
/// # Errors
///
/// Returns an error if the session does not exist or cannot be removed.
pub fn delete(
    store: &SessionStore,
    prompter: &mut dyn Prompter,
    name: &str,
    force: bool,
) -> Result<String, RecorderError> {
    if !store.exists(name) {
        return Err(RecorderError::NotFound(name.to_string()));
    }
    if !force && !prompter.confirm(&format!("Are you sure you want to delete {name} ? (y/N)")) {
        return Ok(String::new());
    }
    store.delete(name)?;
    Ok(format!("{name} successfully deleted"))
}

/// Generate a shell completion script.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, RecorderError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "sessrec", &mut buf);
    String::from_utf8(buf).map_err(|e| RecorderError::Config(format!("UTF-8 error: {e}")))
}
