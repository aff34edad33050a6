//! Appender trait for log output destinations

use super::error::Result;

/// Destination for decorated lines
///
/// Appenders synchronize internally, so one instance can be shared by every
/// thread that logs.
pub trait Appender: Send + Sync {
    /// Write one decorated line, returning the number of bytes written
    fn append(&self, line: &[u8]) -> Result<usize>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
