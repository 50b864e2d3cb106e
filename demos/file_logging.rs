//! File logging example
//!
//! Demonstrates installing the process-wide logger with `setup_logger` and
//! logging through the free functions and macros.
//!
//! Run with: cargo run --example file_logging

use chainlog::global;
use chainlog::prelude::*;
use chainlog::{error, info};

fn main() -> Result<()> {
    println!("=== chainlog - File Logging Example ===\n");

    let settings: LogSettings = serde_json::from_str(
        r#"{
            "file_name": "application",
            "max_size_mb": 10,
            "max_age_days": 7,
            "max_backups": 3,
            "compress": true,
            "format": "json"
        }"#,
    )?;
    let base = LogFileBase::new("logs", "", ".log");
    setup_logger(Some(&settings), &base)?;

    println!("1. Logging through the process-wide logger:");
    global::info("Application started");
    global::debug("Loading configuration...");
    info!("Configuration loaded from {}", "settings.json");
    global::warn("Using default settings for some options");

    println!("2. Performing some operations:");
    let worker = global::logger().with_field("worker", "importer");
    for i in 1..=5 {
        worker.with_field("item", i).infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            error!(worker, "Item {} took longer than expected", i);
        }
    }

    global::info("All operations completed");
    global::logger().flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the full log output", base.resolve(&settings)?.display());
    Ok(())
}
