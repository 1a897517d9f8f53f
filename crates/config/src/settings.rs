//! Configuration structures for sift settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Find/replace behaviour
    #[serde(default)]
    pub search: SearchSettings,

    /// Dialog placement
    #[serde(default)]
    pub dialog: DialogSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Find/replace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Rows of context kept around a selected match
    #[serde(default = "default_scroll_margin")]
    pub scroll_margin: usize,

    /// Close the find/replace dialog when its input loses focus
    #[serde(default = "default_close_on_blur")]
    pub close_on_blur: bool,

    /// Mark matching lines on the scrollbar
    #[serde(default = "default_show_match_annotations")]
    pub show_match_annotations: bool,
}

/// Dialog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogSettings {
    /// Shrink the editor while a dialog is open instead of covering it
    #[serde(default = "default_shrink_editor")]
    pub shrink_editor: bool,

    /// Show dialogs at the bottom of the editor
    #[serde(default = "default_dialog_at_bottom")]
    pub at_bottom: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the cache directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_scroll_margin() -> usize {
    defaults::SCROLL_MARGIN
}

fn default_close_on_blur() -> bool {
    defaults::CLOSE_ON_BLUR
}

fn default_show_match_annotations() -> bool {
    defaults::SHOW_MATCH_ANNOTATIONS
}

fn default_shrink_editor() -> bool {
    defaults::SHRINK_EDITOR
}

fn default_dialog_at_bottom() -> bool {
    defaults::DIALOG_AT_BOTTOM
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            scroll_margin: default_scroll_margin(),
            close_on_blur: default_close_on_blur(),
            show_match_annotations: default_show_match_annotations(),
        }
    }
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            shrink_editor: default_shrink_editor(),
            at_bottom: default_dialog_at_bottom(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
