//! Basic logger usage example
//!
//! Demonstrates leveled logging, chained fields and the two renderings on the
//! console.
//!
//! Run with: cargo run --example basic_usage

use chainlog::prelude::*;
use chainlog::{info, warn};
use std::sync::Arc;

fn handle_request(logger: &Logger, user: &str) {
    // every record from here on names this function as its caller
    let logger = logger.with_caller(1).with_field("user", user);
    logger.info("handling request");
    warn!(logger, "quota at {}%", 87);
}

fn main() -> Result<()> {
    println!("=== chainlog - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .sink(Arc::new(ConsoleSink::stdout()))
        .prefix("demo ")
        .build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Chained loggers:");
    let service = logger.with_fields([("service", "billing"), ("region", "eu-west-1")]);
    handle_request(&service, "alice");
    info!(logger, "the root logger still has {} fields", logger.fields().len());

    println!("\n3. JSON rendering:");
    let json = service.with_format(OutputFormat::Json);
    json.with_field("attempt", 2).error("payment declined");
    json.output_text(LogLevel::Info, "one text line from a JSON logger");

    println!("\n4. Stack walk:");
    let walked = logger.with_callers_frames_depth(3);
    for frame in walked.callers() {
        println!("   {}", frame);
    }

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
