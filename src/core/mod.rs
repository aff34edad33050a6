//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod template;
pub mod timestamp;
pub mod value;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use formatter::{FormatterConfig, DEFAULT_PREFIX, DEFAULT_TIMESTAMP_FORMAT};
pub use log_entry::{CallSite, Caller, LogEntry, UNKNOWN_FUNCTION};
pub use log_level::LogLevel;
pub use logger::{FatalHandler, Logger, LoggerBuilder};
pub use metrics::{LoggerMetrics, RotationMetrics};
pub use template::{render_body, Template, MISSING_ARGUMENT, PLACEHOLDER};
pub use timestamp::{Clock, ManualClock, SystemClock, TimePattern, Zone};
pub use value::{DefaultRenderer, ForeignBuffer, LogValue, ToLogValue, ValueRenderer};
