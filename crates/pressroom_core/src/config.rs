//! Desk configuration: option catalogs, export naming and logging settings.
//!
//! # Responsibility
//! - Provide the option lists whose first entries act as record defaults.
//! - Load overrides from JSON while falling back to built-in values.
//!
//! # Invariants
//! - After loading, every option list is non-empty.
//! - The export file name is never blank.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sentinel category filter value that matches every article.
pub const CATEGORY_FILTER_ALL: &str = "all";

/// Fixed file name used for downloads.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "articles.json";

const DEFAULT_CATEGORIES: &[&str] = &["Technology", "Business", "Culture", "Science", "Opinion"];
const DEFAULT_ACCENT_COLORS: &[&str] = &[
    "text-blue-600",
    "text-emerald-600",
    "text-rose-600",
    "text-amber-600",
    "text-violet-600",
];
const DEFAULT_BORDER_COLORS: &[&str] = &[
    "border-blue-600",
    "border-emerald-600",
    "border-rose-600",
    "border-amber-600",
    "border-violet-600",
];

/// Error raised when a configuration override cannot be parsed.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid desk configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Option catalogs and export settings for one editing session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeskConfig {
    pub categories: Vec<String>,
    pub accent_colors: Vec<String>,
    pub border_colors: Vec<String>,
    pub export_file_name: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            categories: owned(DEFAULT_CATEGORIES),
            accent_colors: owned(DEFAULT_ACCENT_COLORS),
            border_colors: owned(DEFAULT_BORDER_COLORS),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl DeskConfig {
    /// Parses a JSON override. Missing or empty entries keep built-in values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let parsed: Self = serde_json::from_str(text)?;
        Ok(parsed.with_fallbacks())
    }

    /// Replaces empty lists and a blank file name with built-in values.
    pub fn with_fallbacks(mut self) -> Self {
        if self.categories.is_empty() {
            self.categories = owned(DEFAULT_CATEGORIES);
        }
        if self.accent_colors.is_empty() {
            self.accent_colors = owned(DEFAULT_ACCENT_COLORS);
        }
        if self.border_colors.is_empty() {
            self.border_colors = owned(DEFAULT_BORDER_COLORS);
        }
        if self.export_file_name.trim().is_empty() {
            self.export_file_name = DEFAULT_EXPORT_FILE_NAME.to_string();
        }
        self
    }

    pub fn default_category(&self) -> &str {
        first_or_empty(&self.categories)
    }

    pub fn default_accent_color(&self) -> &str {
        first_or_empty(&self.accent_colors)
    }

    pub fn default_border_color(&self) -> &str {
        first_or_empty(&self.border_colors)
    }
}

/// Logging settings consumed by `logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    #[serde(default = "default_log_level_owned")]
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: String,
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
        }
    }
}

/// Returns the default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn default_log_level_owned() -> String {
    default_log_level().to_string()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn first_or_empty(values: &[String]) -> &str {
    values.first().map(String::as_str).unwrap_or("")
}
