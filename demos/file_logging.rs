//! File logging example
//!
//! Demonstrates logging into daily files under `logs/` with a `logs/tiny.log`
//! alias that always points at today's file.
//!
//! Run with: cargo run --example file_logging

use std::sync::Arc;
use tinylog::prelude::*;
use tinylog::{debug, error, info, warn};

fn main() -> Result<()> {
    println!("=== tinylog - File Logging Example ===\n");

    let file = Arc::new(
        RotatingFileAppender::builder("logs/%Y/%m/%d/tiny.log")
            .alias("logs/tiny.log")
            .open_on_create(true)
            .build()?,
    );

    let logger = Logger::builder()
        .config(FormatterConfig::new().with_colors(false).with_timestamp(true).with_caller(true))
        .appender(file.clone())
        .build()?;

    println!("1. Logging to {:?}", file.current_path());

    info!(logger, "Application started");
    debug!(logger, "Loading configuration...");
    warn!(logger, "Using default settings for {} options", 2);
    error!(logger, "Failed to load optional plugin {}", "metrics");

    println!("\n2. Performing some operations:");

    for i in 1..=5 {
        info!(logger, "Processing item {}/{}", i, 5);
        if i == 3 {
            warn!(logger, "Item {} took longer than expected", i);
        }
    }

    logger.flush()?;
    file.close()?;

    let metrics = file.metrics();
    println!(
        "\n{} rotation(s), {} bytes written",
        metrics.rotations(),
        metrics.bytes_written()
    );
    println!("\n=== Example completed successfully! ===");
    println!("Check 'logs/tiny.log' for the full log output");

    Ok(())
}
