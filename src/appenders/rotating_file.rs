//! Time-pattern rotating file appender
//!
//! The destination path is a strftime pattern evaluated against the clock on
//! every write. Whenever the resolved path changes the appender opens the new
//! file, hands the previous handle to a background closer and, if configured,
//! re-points an alias symlink at the new file.
//!
//! Path and handle are stored together, so a rotation that fails to create
//! the directory or open the file leaves the previous state untouched and the
//! next write tries again.

use super::closer::HandleCloser;
use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::metrics::RotationMetrics;
use crate::core::timestamp::{Clock, SystemClock, TimePattern, Zone};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const APPENDER_NAME: &str = "rotating_file";

struct ActiveFile {
    path: PathBuf,
    file: File,
}

#[derive(Default)]
struct SinkState {
    active: Option<ActiveFile>,
    closed: bool,
}

/// File appender whose path follows a time pattern
///
/// # Examples
///
/// ```no_run
/// use tinylog::appenders::RotatingFileAppender;
///
/// let appender = RotatingFileAppender::with_alias(
///     "/var/log/tiny/%Y/%m/%d/tiny.log",
///     "/var/log/tiny/current.log",
/// )
/// .unwrap();
/// appender.write_bytes(b"hello\n").unwrap();
/// appender.close().unwrap();
/// ```
pub struct RotatingFileAppender {
    pattern: TimePattern,
    alias: Option<TimePattern>,
    zone: Zone,
    clock: Arc<dyn Clock>,
    state: Mutex<SinkState>,
    closer: HandleCloser,
    metrics: Arc<RotationMetrics>,
}

impl RotatingFileAppender {
    /// Create an appender writing to the files named by `pattern`
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or malformed
    pub fn new(pattern: &str) -> Result<Self> {
        Self::builder(pattern).build()
    }

    /// Create an appender that also keeps `alias` linked to the active file
    ///
    /// # Errors
    ///
    /// Returns error if either pattern is empty or malformed
    pub fn with_alias(pattern: &str, alias: &str) -> Result<Self> {
        Self::builder(pattern).alias(alias).build()
    }

    pub fn builder(pattern: impl Into<String>) -> RotatingFileBuilder {
        RotatingFileBuilder::new(pattern)
    }

    /// Write `bytes` to the file for the current time, rotating first if needed
    ///
    /// Returns the number of bytes written. On a failed write the error carries
    /// the count that reached the file before the failure
    /// (see [`LoggerError::bytes_written`]).
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<usize> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoggerError::closed(APPENDER_NAME));
        }

        let now = self.clock.now();
        let path = self.pattern.resolve(self.zone, &now)?;

        if state.active.as_ref().map_or(true, |active| active.path != path) {
            self.rotate(&mut state.active, path, &now)?;
        }

        let Some(active) = state.active.as_mut() else {
            return Err(LoggerError::writer("no active log file after rotation"));
        };

        match write_counted(&mut active.file, bytes) {
            Ok(written) => {
                self.metrics.record_bytes(written);
                Ok(written)
            }
            Err((written, source)) => {
                self.metrics.record_bytes(written);
                Err(LoggerError::write_failed(&active.path, written, source))
            }
        }
    }

    /// Path of the file currently receiving writes
    pub fn current_path(&self) -> Option<PathBuf> {
        self.state.lock().active.as_ref().map(|active| active.path.clone())
    }

    /// Release the active file and wait for pending background closes
    ///
    /// Further writes fail with [`LoggerError::AppenderClosed`]. Calling
    /// `close` again is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;

        let result = match state.active.take() {
            Some(active) => active.file.sync_all().map_err(|e| {
                LoggerError::io_operation(
                    "closing log file",
                    format!("Failed to sync '{}'", active.path.display()),
                    e,
                )
            }),
            None => Ok(()),
        };
        drop(state);

        self.closer.drain();
        result
    }

    /// Block until every rotated-out handle has been closed
    pub fn drain(&self) {
        self.closer.drain();
    }

    pub fn metrics(&self) -> &RotationMetrics {
        &self.metrics
    }

    pub fn pattern(&self) -> &TimePattern {
        &self.pattern
    }

    fn rotate(&self, slot: &mut Option<ActiveFile>, path: PathBuf, now: &DateTime<Utc>) -> Result<()> {
        let file = match open_log_file(&path) {
            Ok(file) => file,
            Err(e) => {
                self.metrics.record_rotation_failure();
                tracing::warn!(path = %path.display(), error = %e, "log file rotation failed");
                return Err(e);
            }
        };

        tracing::debug!(path = %path.display(), "rotated log file");
        let previous = slot.replace(ActiveFile {
            path: path.clone(),
            file,
        });
        if let Some(previous) = previous {
            self.closer.schedule(previous.path, previous.file);
        }
        self.metrics.record_rotation();

        if let Some(alias) = &self.alias {
            self.update_alias(alias, &path, now);
        }
        Ok(())
    }

    fn update_alias(&self, alias: &TimePattern, target: &Path, now: &DateTime<Utc>) {
        let link = match alias.resolve(self.zone, now) {
            Ok(link) => link,
            Err(e) => {
                self.metrics.record_alias_failure();
                tracing::info!(alias = alias.as_str(), error = %e, "could not resolve log alias");
                return;
            }
        };

        if link == target || same_location(&link, target) {
            tracing::info!(path = %target.display(), "log alias equals the log file, not linking");
            return;
        }

        match relink(&link, target) {
            Ok(()) => {
                self.metrics.record_alias_update();
            }
            Err(e) => {
                self.metrics.record_alias_failure();
                tracing::info!(
                    alias = %link.display(),
                    target = %target.display(),
                    error = %e,
                    "failed to update log alias"
                );
            }
        }
    }
}

impl Appender for RotatingFileAppender {
    fn append(&self, line: &[u8]) -> Result<usize> {
        self.write_bytes(line)
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        match state.active.as_mut() {
            Some(active) => active.file.flush().map_err(|e| {
                LoggerError::io_operation(
                    "flushing log file",
                    format!("Failed to flush '{}'", active.path.display()),
                    e,
                )
            }),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        APPENDER_NAME
    }
}

impl Write for &RotatingFileAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Appender::flush(*self).map_err(io::Error::from)
    }
}

impl Write for RotatingFileAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut &*self)
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to close rotating log file");
        }
    }
}

/// Builder for [`RotatingFileAppender`]
pub struct RotatingFileBuilder {
    pattern: String,
    alias: Option<String>,
    clock: Option<Arc<dyn Clock>>,
    zone: Zone,
    open_on_create: bool,
}

impl RotatingFileBuilder {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            alias: None,
            clock: None,
            zone: Zone::Local,
            open_on_create: false,
        }
    }

    /// Keep a symlink at `alias` pointing to the active file
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn time_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Open the first file while building instead of on the first write
    #[must_use]
    pub fn open_on_create(mut self, enabled: bool) -> Self {
        self.open_on_create = enabled;
        self
    }

    /// # Errors
    ///
    /// Returns error if a pattern is invalid, the closer thread cannot start,
    /// or `open_on_create` is set and the first file cannot be opened
    pub fn build(self) -> Result<RotatingFileAppender> {
        let pattern = TimePattern::new(self.pattern)?;
        let alias = self.alias.map(TimePattern::new).transpose()?;
        let metrics = Arc::new(RotationMetrics::new());
        let closer = HandleCloser::spawn(Arc::clone(&metrics))?;

        let appender = RotatingFileAppender {
            pattern,
            alias,
            zone: self.zone,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            state: Mutex::new(SinkState::default()),
            closer,
            metrics,
        };

        if self.open_on_create {
            appender.write_bytes(&[])?;
        }
        Ok(appender)
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LoggerError::rotation(path, "creating directory", e))?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options
        .open(path)
        .map_err(|e| LoggerError::rotation(path, "opening file", e))
}

fn write_counted(file: &mut File, mut bytes: &[u8]) -> std::result::Result<usize, (usize, io::Error)> {
    let mut written = 0;
    while !bytes.is_empty() {
        match file.write(bytes) {
            Ok(0) => {
                return Err((
                    written,
                    io::Error::new(io::ErrorKind::WriteZero, "failed to write whole buffer"),
                ))
            }
            Ok(n) => {
                written += n;
                bytes = &bytes[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err((written, e)),
        }
    }
    Ok(written)
}

/// Whether `link` names the file at `target` once directories are resolved
///
/// The final component of `link` is not followed, so an existing alias
/// symlink never counts as the target itself.
fn same_location(link: &Path, target: &Path) -> bool {
    let Some(name) = link.file_name() else {
        return false;
    };
    let parent = match link.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), fs::canonicalize(target)) {
        (Ok(dir), Ok(target)) => dir.join(name) == target,
        _ => false,
    }
}

fn relink(link: &Path, target: &Path) -> io::Result<()> {
    let target = fs::canonicalize(target)?;

    // symlink_metadata also sees dangling links
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link)?;
    }
    if let Some(parent) = link.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    symlink(&target, link)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
