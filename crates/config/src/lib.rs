//! Configuration management for sift.
//!
//! Loads and saves the TOML configuration following XDG directory
//! conventions. Missing keys are filled in with defaults.

mod settings;
mod xdg;

pub use settings::{Config, DialogSettings, LoggingSettings, SearchSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const SCROLL_MARGIN: usize = 2;
    pub const CLOSE_ON_BLUR: bool = false;
    pub const SHOW_MATCH_ANNOTATIONS: bool = true;
    pub const SHRINK_EDITOR: bool = true;
    pub const DIALOG_AT_BOTTOM: bool = false;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 500;
}

impl Config {
    /// Load configuration from the user config directory.
    ///
    /// On first run, creates the config file with default values.
    /// Rewrites the file when keys were missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::validate_content(&original_content)?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the user config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Default log file location.
    pub fn default_log_path() -> Result<PathBuf> {
        Ok(get_cache_dir()?.join("sift.log"))
    }

    /// Parse config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}
