//! Line decoration
//!
//! Wraps a message body with the optional prefix, timestamp, level tag and
//! caller tag. All switches live in [`FormatterConfig`], which the logger
//! owns for its whole lifetime.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::{validate_strftime, Zone};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PREFIX: &str = "[Log]";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%y-%m-%d %H:%M:%S";

const RESET: &str = "\x1b[0m";
const TIMESTAMP_COLOR: Color = Color::Cyan;

/// Configuration for line decoration
///
/// Caller attribution is not configured here: level methods report the code
/// that called them and the macros pass an explicit call site (see
/// [`Caller`](crate::core::Caller)). `show_caller` only toggles the tag.
///
/// # Examples
///
/// ```
/// use tinylog::core::FormatterConfig;
///
/// let config = FormatterConfig::new()
///     .with_colors(false)
///     .with_timestamp(true)
///     .with_prefix("[api]");
/// assert!(config.show_prefix);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Wrap the level tag (and timestamp) in ANSI colors
    pub use_colors: bool,
    pub show_timestamp: bool,
    pub show_prefix: bool,
    /// Add the `[file:line function()]` tag
    pub show_caller: bool,
    pub prefix: String,
    /// strftime format of the timestamp segment
    pub timestamp_format: String,
    pub time_zone: Zone,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            use_colors: !cfg!(windows),
            show_timestamp: false,
            show_prefix: false,
            show_caller: false,
            prefix: DEFAULT_PREFIX.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            time_zone: Zone::Local,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with every optional segment and color turned off
    #[must_use]
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    #[must_use]
    pub fn with_caller(mut self, show: bool) -> Self {
        self.show_caller = show;
        self
    }

    /// Set the prefix text and turn the prefix segment on
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.show_prefix = true;
        self
    }

    #[must_use]
    pub fn with_show_prefix(mut self, show: bool) -> Self {
        self.show_prefix = show;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, zone: Zone) -> Self {
        self.time_zone = zone;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_strftime(&self.timestamp_format)
            .map_err(|e| LoggerError::config("FormatterConfig", e.to_string()))
    }

    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "loading formatter config",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    /// Assemble the decorated line for `entry`
    pub fn format_line(&self, entry: &LogEntry, add_newline: bool) -> String {
        let mut line = String::with_capacity(entry.message.len() + 48);

        if self.show_prefix {
            line.push_str(&self.prefix);
            line.push(' ');
        }

        if self.show_timestamp {
            let stamp = self
                .time_zone
                .format(&entry.timestamp, &self.timestamp_format)
                .unwrap_or_else(|_| entry.timestamp.to_rfc3339());
            if self.use_colors {
                push_colored(&mut line, TIMESTAMP_COLOR, &stamp);
            } else {
                line.push_str(&stamp);
            }
            line.push(' ');
        }

        line.push_str(&self.level_tag(entry.level));
        line.push(' ');

        if self.show_caller {
            if let Some(location) = entry.location {
                line.push_str(&location.tag());
            }
        }

        line.push_str(&entry.message);
        if add_newline {
            line.push('\n');
        }
        line
    }

    /// Level tag exactly as it appears in a line
    pub fn level_tag(&self, level: LogLevel) -> String {
        let mut tag = String::from("[");
        if self.use_colors {
            push_colored(&mut tag, level.color_code(), level.to_str());
        } else {
            tag.push_str(level.to_str());
        }
        tag.push(']');
        tag
    }
}

fn push_colored(out: &mut String, color: Color, text: &str) {
    out.push_str("\x1b[");
    out.push_str(&color.to_fg_str());
    out.push('m');
    out.push_str(text);
    out.push_str(RESET);
}
