//! sessrec - an exploratory testing session recorder
//!
//! This crate provides an interactive command-line recorder for
//! exploratory software-testing sessions: free-text notes and
//! structured commands are captured to a per-session log that can be
//! reviewed later or exported as an HTML report.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod session;
pub mod shell;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::RecorderError;
pub use session::{DurationTimer, Outcome, SessionProcessor, SessionRecord};
pub use storage::SessionStore;
