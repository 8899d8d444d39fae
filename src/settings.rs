//! User settings persistence.
//!
//! This module handles loading and saving extraction preferences across runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::parsers::{LabelMatching, SheetOptions};
use crate::timestamp::TimestampParser;

/// Errors that can occur while saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Platform config directory could not be determined
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Extraction settings that persist across runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Header of the column holding the frame timestamp
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    /// Header of the column holding the decoder's text summary
    #[serde(default = "default_summary_column")]
    pub summary_column: String,
    /// Zero-based worksheet index for spreadsheet input
    #[serde(default)]
    pub sheet_index: usize,
    /// Match field labels regardless of case (`soc: 80`)
    #[serde(default)]
    pub case_insensitive_labels: bool,
    /// Extra `strftime` layouts for text timestamps
    #[serde(default)]
    pub timestamp_formats: Vec<String>,
}

fn default_version() -> u32 {
    1
}

fn default_timestamp_column() -> String {
    "Timestamp".to_string()
}

fn default_summary_column() -> String {
    "Decoded Summary".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            timestamp_column: default_timestamp_column(),
            summary_column: default_summary_column(),
            sheet_index: 0,
            case_insensitive_labels: false,
            timestamp_formats: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the config directory path for evcanlog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("evcanlog"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|p| p.join("evcanlog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON; malformed content yields defaults
    pub fn from_json(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings: {}", e);
            Self::default()
        })
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write settings as pretty JSON to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions {
            timestamp_column: self.timestamp_column.clone(),
            summary_column: self.summary_column.clone(),
            sheet_index: self.sheet_index,
        }
    }

    pub fn label_matching(&self) -> LabelMatching {
        LabelMatching::from_ignore_case(self.case_insensitive_labels)
    }

    pub fn timestamp_parser(&self) -> TimestampParser {
        TimestampParser::with_formats(self.timestamp_formats.clone())
    }
}
