//! # tinylog
//!
//! A small leveled logger with `{}` templates, optional line decoration and a
//! file appender that rotates by time pattern.
//!
//! ## Features
//!
//! - **Templates**: `{}` placeholders filled from typed arguments, with a
//!   fixed fallback for missing ones
//! - **Decoration**: optional prefix, timestamp, colored level tag and
//!   `file:line function()` caller tag
//! - **Rotation**: strftime path patterns, an alias symlink to the active
//!   file and background closing of rotated-out handles
//! - **Thread Safe**: every level method can be called from any thread
//!
//! ## Example
//!
//! ```
//! use tinylog::prelude::*;
//! use tinylog::info;
//!
//! let logger = Logger::builder()
//!     .config(FormatterConfig::plain().with_prefix("[Log]"))
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "Say: {}, {}", "Hello", "World");
//! logger.warn("Value: {}", &[42i32.to_log_value()]);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender};
    pub use crate::core::{
        Appender, CallSite, Caller, Clock, ForeignBuffer, FormatterConfig, LogEntry, LogLevel,
        LogValue, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, ToLogValue,
        ValueRenderer, Zone,
    };
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotatingFileBuilder};
pub use crate::core::{
    Appender, CallSite, Caller, Clock, DefaultRenderer, FatalHandler, ForeignBuffer,
    FormatterConfig, LogEntry, LogLevel, LogValue, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, ManualClock, Result, RotationMetrics, SystemClock, TimePattern, ToLogValue,
    ValueRenderer, Zone,
};
