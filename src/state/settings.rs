//! Browser preferences
//!
//! This struct stores the preferences the browser reads at startup.
//! It is serialized to JSON in the user's config directory, and any
//! problem reading it falls back to the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::listing::MATCH_ALL;

/// Table column: header text and the entry attribute it shows
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub attribute: String,
}

impl Column {
    fn new(header: &str, attribute: &str) -> Self {
        Self {
            header: header.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

/// All preferences for the browser
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrowserSettings {
    /// Directory shown when the browser starts.
    /// None or a non-directory means the user's home.
    pub home_path: Option<PathBuf>,

    /// Header keywords shown for data files (header, keyword)
    pub keywords: Vec<(String, String)>,

    /// Table columns, in display order
    pub columns: Vec<Column>,

    /// Alternate row colors in the table
    pub color_alternate_rows: bool,

    /// Above this many rows, column auto-resize is skipped
    pub max_rows_for_col_resize: usize,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            home_path: dirs::home_dir(),
            keywords: vec![
                ("Object".to_string(), "OBJECT".to_string()),
                ("Date".to_string(), "DATE-OBS".to_string()),
                ("Time UT".to_string(), "UT".to_string()),
            ],
            columns: vec![
                Column::new("Type", "icon"),
                Column::new("Name", "name"),
                Column::new("Size", "size"),
                Column::new("Mode", "mode"),
                Column::new("Last Changed", "modified"),
            ],
            color_alternate_rows: true,
            max_rows_for_col_resize: 5000,
        }
    }
}

impl BrowserSettings {
    /// Default location of the settings file.
    ///
    /// - Linux: ~/.config/pds4-browser/settings.json
    /// - macOS: ~/Library/Application Support/pds4-browser/settings.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pds4-browser").join("settings.json"))
    }

    /// Convert to JSON string for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings, silently falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("no settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&text) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring unreadable settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = self.to_json().map_err(std::io::Error::other)?;
        fs::write(path, json)
    }

    /// The start directory: the configured home if it is a directory,
    /// otherwise the user's home, otherwise the current directory
    pub fn home_dir(&self) -> PathBuf {
        self.home_path
            .clone()
            .filter(|path| path.is_dir())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Pattern listed when the browser starts (`<home>/*`)
    pub fn initial_pattern(&self) -> String {
        self.home_dir().join(MATCH_ALL).to_string_lossy().into_owned()
    }

    /// Whether the table should auto-size its columns for `n_rows`
    pub fn should_resize_columns(&self, n_rows: usize) -> bool {
        n_rows < self.max_rows_for_col_resize
    }
}
