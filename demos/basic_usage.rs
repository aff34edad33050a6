//! Basic logger usage example
//!
//! Demonstrates templates, every level and the optional line segments on the
//! console.
//!
//! Run with: cargo run --example basic_usage

use std::ffi::CStr;
use tinylog::prelude::*;
use tinylog::{debug, error, info, message, warn};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== tinylog - Basic Usage Example ===\n");

    // Default configuration: colored level tag, nothing else
    let logger = Logger::new();

    println!("1. Logging at different levels:");
    debug!(logger, "This is a debug message");
    info!(logger, "Say: {}, {}", "Hello", "World");
    warn!(logger, "Value: {}", 42);
    error!(logger, "Missing argument: {} {}", "only one");

    println!("\n2. Arguments without placeholders are appended:");
    logger.info("Value:", &[42i32.to_log_value()]);

    println!("\n3. MESSAGE level decodes C strings:");
    let from_c = CStr::from_bytes_with_nul(b"Hello, C\0")?;
    message!(logger, "Say: {}", ForeignBuffer::from_c_str(from_c));

    println!("\n4. Every segment enabled:");
    let decorated = Logger::builder()
        .config(
            FormatterConfig::new()
                .with_prefix("[Log]")
                .with_timestamp(true)
                .with_caller(true),
        )
        .build()?;
    info!(decorated, "decorated line from {}", "main");
    decorated.warn("method calls know the file and line only", &[]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
