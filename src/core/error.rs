//! Error types for the logger system

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Time pattern could not be compiled
    #[error("Invalid time pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Directory creation or file open failed while switching files
    #[error("File rotation failed for '{path}' while {operation}: {source}")]
    Rotation {
        path: String,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Write to the active file failed after `written` bytes
    #[error("Write to '{path}' failed after {written} bytes: {source}")]
    WriteFailed {
        path: String,
        written: usize,
        #[source]
        source: std::io::Error,
    },

    /// Appender was closed and cannot be written to again
    #[error("Appender '{name}' is closed")]
    AppenderClosed { name: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid time pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a rotation error for the file that could not be prepared
    pub fn rotation(path: &Path, operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Rotation {
            path: path.display().to_string(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a write error carrying the number of bytes already written
    pub fn write_failed(path: &Path, written: usize, source: std::io::Error) -> Self {
        LoggerError::WriteFailed {
            path: path.display().to_string(),
            written,
            source,
        }
    }

    /// Create an appender closed error
    pub fn closed(name: impl Into<String>) -> Self {
        LoggerError::AppenderClosed { name: name.into() }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Bytes written before the failure, for errors raised mid-write
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        match self {
            LoggerError::WriteFailed { written, .. } => *written,
            _ => 0,
        }
    }
}

impl From<LoggerError> for std::io::Error {
    fn from(err: LoggerError) -> Self {
        match err {
            LoggerError::IoError(source) => source,
            other => std::io::Error::other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::pattern("logs/%Q", "unknown directive");
        assert!(matches!(err, LoggerError::InvalidPattern { .. }));

        let err = LoggerError::config("FormatterConfig", "empty prefix");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::closed("rotating_file");
        assert!(matches!(err, LoggerError::AppenderClosed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::pattern("logs/%Q.log", "unknown directive");
        assert_eq!(
            err.to_string(),
            "Invalid time pattern 'logs/%Q.log': unknown directive"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::rotation(&PathBuf::from("/var/log/app.log"), "opening file", io_err);
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log' while opening file: denied"
        );

        let err = LoggerError::closed("rotating_file");
        assert_eq!(err.to_string(), "Appender 'rotating_file' is closed");
    }

    #[test]
    fn test_write_failed_keeps_count() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full");
        let err = LoggerError::write_failed(&PathBuf::from("a.log"), 7, io_err);
        assert_eq!(err.bytes_written(), 7);
        assert_eq!(LoggerError::writer("x").bytes_written(), 0);
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("reading config", "cannot open file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("reading config"));
        assert!(err.to_string().contains("cannot open file"));
    }

    #[test]
    fn test_into_io_error() {
        let io: std::io::Error = LoggerError::closed("console").into();
        assert_eq!(io.kind(), std::io::ErrorKind::Other);
        assert!(io.to_string().contains("console"));
    }
}
