//! Process-wide logger
//!
//! The handle goes from uninstalled to installed exactly once, through
//! [`set_logger`] or [`crate::setup::setup_logger`]. Every free function reads it
//! and panics with `invalid logger reference` when nothing is installed: logging
//! before setup is an initialization-order bug, not a condition to recover from.

use crate::core::{LogLevel, Logger, LoggerError, Result};
use std::fmt;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

const INVALID_LOGGER: &str = "invalid logger reference";

/// Install `logger` as the process-wide logger.
///
/// # Errors
///
/// Returns [`LoggerError::AlreadyInitialized`] if a logger is already installed.
pub fn set_logger(logger: Logger) -> Result<()> {
    LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The installed logger.
///
/// # Panics
///
/// Panics with `invalid logger reference` if none is installed.
pub fn logger() -> &'static Logger {
    match LOGGER.get() {
        Some(logger) => logger,
        None => panic!("{}", INVALID_LOGGER),
    }
}

pub fn try_logger() -> Option<&'static Logger> {
    LOGGER.get()
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

pub fn log(level: LogLevel, message: impl Into<String>) {
    logger().log(level, message);
}

pub fn debug(message: impl fmt::Display) {
    logger().debug(message);
}

pub fn debugf(args: fmt::Arguments<'_>) {
    logger().debugf(args);
}

pub fn info(message: impl fmt::Display) {
    logger().info(message);
}

pub fn infof(args: fmt::Arguments<'_>) {
    logger().infof(args);
}

pub fn warn(message: impl fmt::Display) {
    logger().warn(message);
}

pub fn warnf(args: fmt::Arguments<'_>) {
    logger().warnf(args);
}

pub fn error(message: impl fmt::Display) {
    logger().error(message);
}

pub fn errorf(args: fmt::Arguments<'_>) {
    logger().errorf(args);
}

pub fn fatal(message: impl fmt::Display) -> ! {
    logger().fatal(message)
}

pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    logger().fatalf(args)
}

pub fn panic(message: impl fmt::Display) -> ! {
    logger().panic(message)
}

pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    logger().panicf(args)
}
