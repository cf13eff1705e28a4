//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "sessrec")]
#[command(about = "An interactive session recorder for exploratory software testing")]
#[command(long_about = "sessrec - record exploratory testing sessions from the command line

Run without a subcommand to start the interactive shell. Inside the
shell, open a session with 'open <name>' and every line you type is
captured to the session log; structured commands (bug, mission,
timebox, areas, pause, undo, ...) update the session's metadata.
Sessions can be reviewed later with 'show' or exported to an HTML
report with 'report'.

QUICK START:
  sessrec                   Start the interactive shell
  sessrec list              List recorded sessions
  sessrec show smoke-test   Print a session's contents
  sessrec report smoke-test Generate an HTML report")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory where session files are stored
    #[arg(long, env = "SESSREC_SESSIONS_DIR", global = true)]
    pub sessions_dir: Option<PathBuf>,

    /// Directory where HTML reports are written
    #[arg(long, env = "SESSREC_REPORTS_DIR", global = true)]
    pub reports_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all recorded sessions
    List,

    /// Show the contents of a recorded session
    Show {
        /// Session name
        name: String,
    },

    /// Generate an HTML report for a recorded session
    Report {
        /// Session name
        name: String,
        /// Write the report under this file name instead of the session name
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Permanently delete a recorded session
    Delete {
        /// Session name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
