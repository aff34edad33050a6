//! Log entry structure and caller location

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// Marker printed when the enclosing function cannot be resolved
pub const UNKNOWN_FUNCTION: &str = "?()";

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    /// Fully qualified function path, when known
    pub function: Option<&'static str>,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self { file, line, function }
    }

    /// Location of the caller, as propagated through `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            function: None,
        }
    }

    /// Final path component of the source file
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.file)
    }

    /// Short function name with call parentheses, or [`UNKNOWN_FUNCTION`]
    pub fn function_name(&self) -> String {
        let Some(path) = self.function else {
            return UNKNOWN_FUNCTION.to_string();
        };

        let mut trimmed = path;
        while let Some(stripped) = trimmed.strip_suffix("::{{closure}}") {
            trimmed = stripped;
        }

        match trimmed.rsplit("::").next() {
            Some(name) if !name.is_empty() => format!("{}()", name),
            _ => UNKNOWN_FUNCTION.to_string(),
        }
    }

    /// `[file:line function()] ` tag used in decorated lines
    pub fn tag(&self) -> String {
        format!("[{}:{} {}] ", self.file_name(), self.line, self.function_name())
    }
}

/// Which call site a log line is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    /// The code that invoked the level entry point
    #[default]
    Auto,
    /// An explicit call site supplied by a macro or a foreign bridge
    At(CallSite),
}

impl Caller {
    #[track_caller]
    pub fn resolve(self) -> CallSite {
        match self {
            Caller::Auto => CallSite::caller(),
            Caller::At(site) => site,
        }
    }
}

impl From<CallSite> for Caller {
    fn from(site: CallSite) -> Self {
        Caller::At(site)
    }
}

/// Fully qualified name of the enclosing function
///
/// ```
/// fn outer() -> &'static str {
///     tinylog::function_path!()
/// }
/// assert!(outer().ends_with("outer"));
/// ```
#[macro_export]
macro_rules! function_path {
    () => {{
        fn __tinylog_marker() {}
        fn __tinylog_type_name<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __tinylog_type_name(__tinylog_marker);
        name.strip_suffix("::__tinylog_marker").unwrap_or(name)
    }};
}

/// Call site of the macro invocation, including the enclosing function
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), line!(), Some($crate::function_path!()))
    };
}

/// One log call, before decoration
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub location: Option<CallSite>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            level,
            message,
            timestamp,
            location: None,
        }
    }

    pub fn with_location(mut self, location: CallSite) -> Self {
        self.location = Some(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_with_function() {
        let site = CallSite::new("src/bin/server.rs", 42, Some("server::net::accept"));
        assert_eq!(site.tag(), "[server.rs:42 accept()] ");
    }

    #[test]
    fn test_unknown_function_marker() {
        let site = CallSite::new("main.rs", 7, None);
        assert_eq!(site.function_name(), UNKNOWN_FUNCTION);
        assert_eq!(site.tag(), "[main.rs:7 ?()] ");
    }

    #[test]
    fn test_closure_suffix_stripped() {
        let site = CallSite::new("a.rs", 1, Some("app::worker::run::{{closure}}::{{closure}}"));
        assert_eq!(site.function_name(), "run()");
    }

    #[test]
    fn test_windows_file_name() {
        let site = CallSite::new("C:\\src\\lib.rs", 3, None);
        assert_eq!(site.file_name(), "lib.rs");
    }

    #[test]
    fn test_caller_tracks_this_file() {
        let site = Caller::Auto.resolve();
        assert!(site.file.ends_with("log_entry.rs"));
        assert!(site.function.is_none());
    }

    #[test]
    fn test_call_site_macro() {
        let site = crate::call_site!();
        assert!(site.file.ends_with("log_entry.rs"));
        assert_eq!(site.function_name(), "test_call_site_macro()");
    }

    #[test]
    fn test_explicit_caller_is_kept() {
        let site = CallSite::new("x.rs", 9, Some("x::y"));
        assert_eq!(Caller::from(site).resolve(), site);
    }
}
