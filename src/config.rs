use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

fn default_user_string() -> String {
    "yo@website".to_string()
}

fn default_start_date() -> String {
    "2018-12-01".to_string()
}

fn default_scroll_top_threshold() -> u16 {
    20
}

/// Site settings (~/.termfolio/settings.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Replaces `User@Website` in titles and fills user-name placeholders
    #[serde(default = "default_user_string")]
    pub user_string: String,
    /// Career start date for the uptime line, `YYYY-MM-DD`
    #[serde(default = "default_start_date")]
    pub start_date: String,
    /// Rows scrolled before the scroll-to-top button appears
    #[serde(default = "default_scroll_top_threshold")]
    pub scroll_top_threshold: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_string: default_user_string(),
            start_date: default_start_date(),
            scroll_top_threshold: default_scroll_top_threshold(),
        }
    }
}

impl Settings {
    /// Returns the config directory path (~/.termfolio)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".termfolio"))
    }

    /// Returns the palette override directory (~/.termfolio/themes)
    pub fn themes_dir() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("themes"))
    }

    /// Returns the log directory (~/.termfolio/logs)
    pub fn log_dir() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("logs"))
    }

    /// Returns the durable key-value storage file (~/.termfolio/storage.json)
    pub fn storage_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("storage.json"))
    }

    /// Returns the config file path (~/.termfolio/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Ensures the config directory and a default settings file exist
    pub fn ensure_config_exists() {
        if let Some(config_dir) = Self::config_dir() {
            if !config_dir.exists() && fs::create_dir_all(&config_dir).is_ok() {
                // Set directory permissions to user-only on Unix
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let perms = fs::Permissions::from_mode(0o700);
                    let _ = fs::set_permissions(&config_dir, perms);
                }
            }
        }

        if let Some(config_path) = Self::config_path() {
            if !config_path.exists() {
                if let Err(e) = Self::default().save() {
                    tracing::warn!("Could not write default settings: {}", e);
                }
            }
        }
    }

    /// Loads settings, returns default if not found or invalid
    pub fn load() -> Self {
        match Self::load_with_error() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_with_error() -> Result<Self> {
        Self::ensure_config_exists();

        let config_path = Self::config_path().ok_or(SiteError::NoConfigDir)?;
        let content = fs::read_to_string(&config_path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(content)?;
        Ok(settings)
    }

    /// Saves settings to the config file using atomic write pattern
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir().ok_or(SiteError::NoConfigDir)?;
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("settings.json");
        let temp_path = config_dir.join("settings.json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        // Atomic write: write to temp file first, then rename
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &config_path)?;

        Ok(())
    }

    /// Parsed career start date; an invalid value falls back to the default
    pub fn start_date(&self) -> NaiveDate {
        match parse_start_date(&self.start_date) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("{}", e);
                NaiveDate::from_ymd_opt(2018, 12, 1).unwrap_or_default()
            }
        }
    }
}

pub fn parse_start_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| SiteError::InvalidStartDate(value.to_string()))
}
