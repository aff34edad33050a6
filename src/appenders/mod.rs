//! Appender implementations

mod closer;
pub mod console;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use rotating_file::{RotatingFileAppender, RotatingFileBuilder};

pub use crate::core::Appender;
