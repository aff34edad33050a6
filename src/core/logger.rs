//! Main logger implementation

use super::{
    appender::Appender,
    error::Result,
    formatter::FormatterConfig,
    log_entry::{CallSite, Caller, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    template::render_body,
    timestamp::{Clock, SystemClock},
    value::{DefaultRenderer, LogValue, ValueRenderer},
};
use crate::appenders::ConsoleAppender;
use parking_lot::RwLock;
use std::process;
use std::sync::Arc;

/// Called after a FATAL line has been written and flushed
pub type FatalHandler = Arc<dyn Fn(&LogEntry) + Send + Sync>;

fn exit_process(_entry: &LogEntry) {
    process::exit(1)
}

/// Templated, decorated logger
///
/// Each call renders the template, decorates the body according to the
/// [`FormatterConfig`] and performs exactly one write to the output appender,
/// or to standard output when no appender is set.
///
/// # Examples
///
/// ```
/// use tinylog::prelude::*;
///
/// let logger = Logger::builder()
///     .config(FormatterConfig::plain())
///     .build()
///     .unwrap();
/// logger.info("Say: {}, {}", &["Hello".to_log_value(), "World".to_log_value()]);
/// ```
pub struct Logger {
    config: FormatterConfig,
    renderer: Arc<dyn ValueRenderer>,
    appender: RwLock<Option<Arc<dyn Appender>>>,
    console: ConsoleAppender,
    clock: Arc<dyn Clock>,
    on_fatal: FatalHandler,
    /// Metrics for observability (lines written, lines lost)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with the default configuration writing to standard output
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            renderer: Arc::new(DefaultRenderer),
            appender: RwLock::new(None),
            console: ConsoleAppender::new(),
            clock: Arc::new(SystemClock),
            on_fatal: Arc::new(exit_process),
            metrics: LoggerMetrics::new(),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Replace the output appender, returning the previous one
    pub fn set_output(&self, appender: Arc<dyn Appender>) -> Option<Arc<dyn Appender>> {
        self.appender.write().replace(appender)
    }

    /// Go back to writing to standard output
    pub fn clear_output(&self) -> Option<Arc<dyn Appender>> {
        self.appender.write().take()
    }

    pub fn flush(&self) -> Result<()> {
        match self.current_appender() {
            Some(appender) => appender.flush(),
            None => self.console.flush(),
        }
    }

    /// Render, decorate and write one line
    ///
    /// Returns the number of bytes the appender accepted. A FATAL line is
    /// flushed and then handed to the fatal handler, which by default exits
    /// the process with status 1, whether or not the write succeeded.
    #[track_caller]
    pub fn print(
        &self,
        level: LogLevel,
        caller: Caller,
        add_newline: bool,
        template: &str,
        args: &[LogValue<'_>],
    ) -> Result<usize> {
        let location = caller.resolve();
        let body = render_body(level, template, args, self.renderer.as_ref());
        let entry = LogEntry::new(level, body, self.clock.now()).with_location(location);
        let line = self.config.format_line(&entry, add_newline);

        let result = self.write_line(line.as_bytes());
        match result {
            Ok(_) => {
                self.metrics.record_logged();
            }
            Err(_) => {
                self.metrics.record_dropped();
            }
        }

        if level.is_fatal() {
            if let Err(e) = self.flush() {
                tracing::error!(error = %e, "failed to flush before fatal exit");
            }
            (self.on_fatal)(&entry);
        }

        result
    }

    /// Log at `level`, attributing the line to an explicit call site
    pub fn log_at(&self, level: LogLevel, site: CallSite, template: &str, args: &[LogValue<'_>]) {
        self.emit(level, Caller::At(site), template, args);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, template: &str, args: &[LogValue<'_>]) {
        self.emit(LogLevel::Debug, Caller::Auto, template, args);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, template: &str, args: &[LogValue<'_>]) {
        self.emit(LogLevel::Info, Caller::Auto, template, args);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, template: &str, args: &[LogValue<'_>]) {
        self.emit(LogLevel::Warn, Caller::Auto, template, args);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, template: &str, args: &[LogValue<'_>]) {
        self.emit(LogLevel::Error, Caller::Auto, template, args);
    }

    /// Log at FATAL, then run the fatal handler
    #[inline]
    #[track_caller]
    pub fn fatal(&self, template: &str, args: &[LogValue<'_>]) {
        self.emit(LogLevel::Fatal, Caller::Auto, template, args);
    }

    /// Log at MESSAGE, decoding foreign buffer arguments to text
    #[inline]
    #[track_caller]
    pub fn message(&self, template: &str, args: &[LogValue<'_>]) {
        self.emit(LogLevel::Message, Caller::Auto, template, args);
    }

    #[track_caller]
    fn emit(&self, level: LogLevel, caller: Caller, template: &str, args: &[LogValue<'_>]) {
        if let Err(e) = self.print(level, caller, true, template, args) {
            tracing::error!(level = %level, error = %e, "failed to write log line");
        }
    }

    fn current_appender(&self) -> Option<Arc<dyn Appender>> {
        self.appender.read().clone()
    }

    fn write_line(&self, line: &[u8]) -> Result<usize> {
        // The lock is not held across the write
        match self.current_appender() {
            Some(appender) => appender.append(line),
            None => self.console.append(line),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a Logger with custom configuration
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tinylog::prelude::*;
///
/// let file = RotatingFileAppender::new("/var/log/tiny/%Y/%m/%d/tiny.log").unwrap();
/// let logger = Logger::builder()
///     .config(FormatterConfig::new().with_timestamp(true).with_caller(true))
///     .appender(Arc::new(file))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: FormatterConfig,
    renderer: Arc<dyn ValueRenderer>,
    appender: Option<Arc<dyn Appender>>,
    clock: Arc<dyn Clock>,
    on_fatal: FatalHandler,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            renderer: Arc::new(DefaultRenderer),
            appender: None,
            clock: Arc::new(SystemClock),
            on_fatal: Arc::new(exit_process),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn renderer(mut self, renderer: Arc<dyn ValueRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appender = Some(appender);
        self
    }

    /// Time source for line timestamps
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the process exit that follows a FATAL line
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal<F>(mut self, handler: F) -> Self
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.on_fatal = Arc::new(handler);
        self
    }

    /// # Errors
    ///
    /// Returns error if the timestamp format is not a valid strftime string
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;
        Ok(Logger {
            config: self.config,
            renderer: self.renderer,
            appender: RwLock::new(self.appender),
            console: ConsoleAppender::new(),
            clock: self.clock,
            on_fatal: self.on_fatal,
            metrics: LoggerMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::timestamp::{ManualClock, Zone};
    use crate::core::value::ToLogValue;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Capture {
        lines: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Capture {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }
    }

    impl Appender for Capture {
        fn append(&self, line: &[u8]) -> Result<usize> {
            if self.fail {
                return Err(LoggerError::writer("disk full"));
            }
            self.lines.lock().push(String::from_utf8_lossy(line).into_owned());
            Ok(line.len())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn capture_logger(config: FormatterConfig) -> (Logger, Arc<Capture>) {
        let capture = Arc::new(Capture::default());
        let logger = Logger::builder()
            .config(config)
            .appender(capture.clone())
            .on_fatal(|_| {})
            .build()
            .unwrap();
        (logger, capture)
    }

    #[test]
    fn test_plain_info_line() {
        let (logger, capture) = capture_logger(FormatterConfig::plain());
        logger.info("Say: {}, {}", &["Hello".to_log_value(), "World".to_log_value()]);
        assert_eq!(capture.lines(), vec!["[INFO] Say: Hello, World\n"]);
        assert_eq!(logger.metrics().total_logged(), 1);
    }

    #[test]
    fn test_colored_warn_line() {
        let (logger, capture) = capture_logger(FormatterConfig::plain().with_colors(true));
        logger.warn("Value: {}", &[42i32.to_log_value()]);
        assert_eq!(capture.lines(), vec!["[\x1b[33mWARN\x1b[0m] Value: 42\n"]);
    }

    #[test]
    fn test_print_without_newline() {
        let (logger, capture) = capture_logger(FormatterConfig::plain());
        let written = logger
            .print(LogLevel::Debug, Caller::Auto, false, "no newline", &[])
            .unwrap();
        assert_eq!(written, "[DEBUG] no newline".len());
        assert_eq!(capture.lines(), vec!["[DEBUG] no newline"]);
    }

    #[test]
    fn test_entry_points_track_caller() {
        let (logger, capture) = capture_logger(FormatterConfig::plain().with_caller(true));
        let line = line!() + 1;
        logger.error("located", &[]);
        assert_eq!(
            capture.lines(),
            vec![format!("[ERROR] [logger.rs:{} ?()] located\n", line)]
        );
    }

    #[test]
    fn test_log_at_uses_explicit_site() {
        let (logger, capture) = capture_logger(FormatterConfig::plain().with_caller(true));
        let site = CallSite::new("bridge/ffi.c", 88, Some("bridge::emit"));
        logger.log_at(LogLevel::Message, site, "from C", &[]);
        assert_eq!(capture.lines(), vec!["[MESSAGE] [ffi.c:88 emit()] from C\n"]);
    }

    #[test]
    fn test_timestamp_from_clock() {
        let capture = Arc::new(Capture::default());
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2022, 8, 12, 9, 5, 1).unwrap()));
        let logger = Logger::builder()
            .config(
                FormatterConfig::plain()
                    .with_timestamp(true)
                    .with_time_zone(Zone::Utc)
                    .with_prefix("[Log]"),
            )
            .appender(capture.clone())
            .clock(clock)
            .build()
            .unwrap();

        logger.info("tick", &[]);
        assert_eq!(capture.lines(), vec!["[Log] 22-08-12 09:05:01 [INFO] tick\n"]);
    }

    #[test]
    fn test_fatal_writes_before_handler() {
        let capture = Arc::new(Capture::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let capture_in_handler = capture.clone();
        let seen_in_handler = seen.clone();
        let logger = Logger::builder()
            .config(FormatterConfig::plain())
            .appender(capture.clone())
            .on_fatal(move |entry| {
                seen_in_handler.lock().push((entry.message.clone(), capture_in_handler.lines()));
            })
            .build()
            .unwrap();

        logger.fatal("giving up: {}", &["disk".to_log_value()]);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "giving up: disk");
        assert_eq!(seen[0].1, vec!["[FATAL] giving up: disk\n"]);
    }

    #[test]
    fn test_write_failure_is_counted_not_raised() {
        let capture = Arc::new(Capture {
            fail: true,
            ..Capture::default()
        });
        let logger = Logger::builder()
            .config(FormatterConfig::plain())
            .appender(capture)
            .build()
            .unwrap();

        logger.info("lost", &[]);
        assert_eq!(logger.metrics().dropped_count(), 1);

        let err = logger.print(LogLevel::Info, Caller::Auto, true, "lost", &[]).unwrap_err();
        assert!(matches!(err, LoggerError::WriterError(_)));
    }

    #[test]
    fn test_set_output_replaces_appender() {
        let (logger, first) = capture_logger(FormatterConfig::plain());
        let second = Arc::new(Capture::default());

        logger.info("one", &[]);
        let previous = logger.set_output(second.clone());
        assert_eq!(previous.map(|a| a.name().to_string()), Some("capture".to_string()));
        logger.info("two", &[]);

        assert_eq!(first.lines(), vec!["[INFO] one\n"]);
        assert_eq!(second.lines(), vec!["[INFO] two\n"]);
    }

    #[test]
    fn test_console_fallback() {
        let logger = Logger::builder()
            .config(FormatterConfig::plain())
            .build()
            .unwrap();
        let written = logger
            .print(LogLevel::Info, Caller::Auto, true, "to stdout", &[])
            .unwrap();
        assert_eq!(written, "[INFO] to stdout\n".len());
        assert!(logger.clear_output().is_none());
    }

    #[test]
    fn test_builder_rejects_bad_timestamp_format() {
        let result = Logger::builder()
            .config(FormatterConfig::new().with_timestamp_format("%Q"))
            .build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_custom_renderer() {
        struct Upper;
        impl ValueRenderer for Upper {
            fn render(&self, value: &LogValue<'_>) -> String {
                format!("<{:?}>", value)
            }
        }

        let capture = Arc::new(Capture::default());
        let logger = Logger::builder()
            .config(FormatterConfig::plain())
            .renderer(Arc::new(Upper))
            .appender(capture.clone())
            .build()
            .unwrap();

        logger.info("{} {}", &["text".to_log_value(), true.to_log_value()]);
        let lines = capture.lines();
        assert!(lines[0].starts_with("[INFO] text <"));
    }
}
