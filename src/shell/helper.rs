//! Readline helper: completion and hints for the interactive shell.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::storage::SessionStore;

/// Top-level shell commands, for completion.
pub const SHELL_COMMANDS: &[&str] = &[
    "new", "open", "show", "list", "report", "delete", "help", "quit",
];

/// Commands whose argument is a stored session name.
const SESSION_ARG_COMMANDS: &[&str] = &["open", "show", "report", "delete"];

/// Completes shell command names and stored session names.
pub struct ShellHelper {
    store: SessionStore,
}

impl ShellHelper {
    /// Create a helper completing against the given store.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Session names starting with `partial`, freshly listed so new
    /// sessions complete without restarting the shell.
    fn matching_sessions(&self, partial: &str) -> Vec<Pair> {
        self.store
            .list()
            .unwrap_or_default()
            .into_iter()
            .filter(|s| s.name.starts_with(partial))
            .map(|s| Pair {
                display: s.name.clone(),
                replacement: s.name,
            })
            .collect()
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some((cmd, partial)) = line.split_once(' ') {
            if SESSION_ARG_COMMANDS.contains(&cmd) {
                let start = cmd.len() + 1;
                return Ok((start, self.matching_sessions(partial)));
            }
            return Ok((pos, Vec::new()));
        }

        let candidates = SHELL_COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: (*cmd).to_string(),
                replacement: (*cmd).to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        SHELL_COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}
