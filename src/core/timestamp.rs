//! Time sources and strftime time patterns
//!
//! The rotating appender and the line timestamp both read time through a
//! [`Clock`], so tests can move time across rotation boundaries without
//! sleeping.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, Local, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::str::FromStr;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
///
/// # Examples
///
/// ```
/// use tinylog::core::{Clock, ManualClock};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let clock = ManualClock::new(Utc.with_ymd_and_hms(2022, 8, 15, 23, 59, 0).unwrap());
/// clock.advance(Duration::minutes(2));
/// assert_eq!(clock.now(), Utc.with_ymd_and_hms(2022, 8, 16, 0, 1, 0).unwrap());
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Time zone used when a pattern or timestamp is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    Local,
    Utc,
}

impl Zone {
    /// Render `datetime` with a strftime `format` in this zone
    pub fn format(&self, datetime: &DateTime<Utc>, format: &str) -> std::result::Result<String, fmt::Error> {
        let mut out = String::with_capacity(format.len() + 16);
        match self {
            Zone::Local => write!(out, "{}", datetime.with_timezone(&Local).format(format))?,
            Zone::Utc => write!(out, "{}", datetime.format(format))?,
        }
        Ok(out)
    }
}

/// Check that `format` only contains directives chrono understands
pub fn validate_strftime(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::pattern(format, "unsupported or incomplete strftime directive"));
    }
    Ok(())
}

/// Strftime pattern that maps a point in time to a file path
///
/// # Examples
///
/// ```
/// use tinylog::core::{TimePattern, Zone};
/// use chrono::{TimeZone, Utc};
///
/// let pattern = TimePattern::new("logs/%Y/%m/%d/app.log").unwrap();
/// let at = Utc.with_ymd_and_hms(2022, 8, 15, 12, 0, 0).unwrap();
/// assert_eq!(
///     pattern.resolve(Zone::Utc, &at).unwrap(),
///     std::path::PathBuf::from("logs/2022/08/15/app.log")
/// );
///
/// assert!(TimePattern::new("logs/%Q.log").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePattern {
    pattern: String,
}

impl TimePattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(LoggerError::pattern(pattern, "pattern is empty"));
        }
        validate_strftime(&pattern)?;
        Ok(Self { pattern })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Evaluate the pattern at `at`
    pub fn resolve(&self, zone: Zone, at: &DateTime<Utc>) -> Result<PathBuf> {
        zone.format(at, &self.pattern)
            .map(PathBuf::from)
            .map_err(|_| LoggerError::pattern(self.pattern.as_str(), "pattern could not be rendered"))
    }
}

impl FromStr for TimePattern {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for TimePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
