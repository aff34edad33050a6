//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::{self, Write};

/// Writes decorated lines to standard output
///
/// This is where the logger sends lines when no other appender is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, line: &[u8]) -> Result<usize> {
        // One locked write keeps concurrent lines from interleaving
        let mut stdout = io::stdout().lock();
        stdout.write_all(line)?;
        Ok(line.len())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
