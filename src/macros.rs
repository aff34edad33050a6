//! Logging macros with `{}` templates.
//!
//! The macros take the logger, a template and any number of arguments that
//! implement [`ToLogValue`](crate::ToLogValue). Unlike the level methods on
//! [`Logger`](crate::Logger), they record the enclosing function name as part
//! of the call site.
//!
//! # Examples
//!
//! ```
//! use tinylog::prelude::*;
//! use tinylog::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With template arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Missing arguments render as "not found!"
//! info!(logger, "User {} performed action: {}", 42);
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use tinylog::prelude::*;
/// # let logger = Logger::new();
/// use tinylog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            $level,
            $crate::call_site!(),
            $template,
            &[$($crate::ToLogValue::to_log_value(&$arg)),*],
        )
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use tinylog::prelude::*;
/// # let logger = Logger::new();
/// use tinylog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then run the logger's fatal handler.
///
/// With the default handler this exits the process with status 1.
///
/// ```
/// # use tinylog::prelude::*;
/// use tinylog::fatal;
/// let logger = Logger::builder().on_fatal(|_| {}).build().unwrap();
/// fatal!(logger, "cannot continue: {}", "config missing");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log a MESSAGE-level line; foreign buffer arguments are decoded to text.
///
/// ```
/// # use tinylog::prelude::*;
/// use std::ffi::CStr;
/// use tinylog::message;
///
/// let logger = Logger::new();
/// let from_c = CStr::from_bytes_with_nul(b"Hello, C\0").unwrap();
/// message!(logger, "Say: {}", ForeignBuffer::from_c_str(from_c));
/// ```
#[macro_export]
macro_rules! message {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Message, $($arg)+)
    };
}
