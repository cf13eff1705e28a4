//! Configuration settings for sessrec.
//!
//! Settings are loaded from `~/.sessrec/config.yaml`. A missing file
//! yields defaults; every field is individually optional.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::RecorderError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Session recording settings.
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format for one-shot commands.
    pub default_output: OutputFormat,
    /// Color output setting.
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Session recording settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Override for the sessions directory.
    pub sessions_dir: Option<PathBuf>,
    /// Override for the reports directory.
    pub reports_dir: Option<PathBuf>,
    /// strftime format for log-entry timestamps.
    pub timestamp_format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sessions_dir: None,
            reports_dir: None,
            timestamp_format: "[%Y-%m-%d %H:%M:%S]".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns defaults if the config file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, RecorderError> {
        let paths = Paths::new()?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &std::path::Path) -> Result<Self, RecorderError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| RecorderError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply the color setting to the global colored-output switch.
    pub fn apply_color(&self) {
        match self.general.color {
            ColorSetting::Always => colored::control::set_override(true),
            ColorSetting::Never => colored::control::set_override(false),
            ColorSetting::Auto => {}
        }
    }
}
