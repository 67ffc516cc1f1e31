//! Configuration file support for BBAT.
//!
//! Settings are stored as JSON. Every section and field is optional; missing
//! values fall back to the defaults below.
//!
//! ```json
//! {
//!   "version": 1,
//!   "preferences": { "log_level": "debug", "tick_rate": 30 },
//!   "keybindings": [
//!     { "key": "space", "command": "advance" },
//!     { "key": "s", "command": "save" },
//!     { "key": "1", "command": { "assign_label": 1 } }
//!   ]
//! }
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::{KeyBinding, KeyBindings};
use crate::constants::{DEFAULT_TICK_RATE, window};
use crate::error::{LabelError, Result};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Get all log levels in order from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LogLevel::all()
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown log level '{s}'"))
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Key to command table; replaces the built-in table when present
    #[serde(default = "default_keybindings")]
    pub keybindings: Vec<KeyBinding>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_keybindings() -> Vec<KeyBinding> {
    KeyBindings::default().bindings().to_vec()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Event polls per second; 0 polls as fast as input arrives
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,

    /// Largest displayed image width
    #[serde(default = "default_max_image_width")]
    pub max_image_width: f64,

    /// Largest displayed image height
    #[serde(default = "default_max_image_height")]
    pub max_image_height: f64,
}

fn default_tick_rate() -> u32 {
    DEFAULT_TICK_RATE
}

fn default_max_image_width() -> f64 {
    window::MAX_IMAGE_BOX.0
}

fn default_max_image_height() -> f64 {
    window::MAX_IMAGE_BOX.1
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            tick_rate: default_tick_rate(),
            max_image_width: default_max_image_width(),
            max_image_height: default_max_image_height(),
        }
    }
}

impl UserPreferences {
    /// Time between polls, or `None` when the loop should not wait.
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_rate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.tick_rate)))
    }

    /// Box the displayed image is fitted into.
    pub fn max_image_box(&self) -> (f64, f64) {
        (self.max_image_width, self.max_image_height)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            keybindings: default_keybindings(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(LabelError::ConfigVersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// The key binding table described by this configuration.
    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::from_bindings(self.keybindings.clone())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
