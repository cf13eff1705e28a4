//! Output formatting for session data.

mod pretty;

pub use pretty::{bar, format_header, format_session, format_session_list, terminal_width};

use crate::error::RecorderError;

/// Serialize a value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RecorderError> {
    Ok(serde_json::to_string_pretty(value)?)
}
