//! Logging macros for ergonomic log message formatting.
//!
//! Each level macro takes either a logger followed by `format!`-style
//! arguments, or the arguments alone to log through the process-wide logger.
//!
//! # Examples
//!
//! ```
//! use chainlog::{info, Flags, Logger};
//!
//! let logger = Logger::new(std::io::sink(), "", Flags::STD);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use chainlog::{Flags, Logger, LogLevel};
/// # let logger = Logger::new(std::io::sink(), "", Flags::NONE);
/// use chainlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use chainlog::{Flags, Logger};
/// # let logger = Logger::new(std::io::sink(), "", Flags::NONE);
/// use chainlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::debugf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::infof(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::warnf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::errorf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::fatalf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}

/// Log a panic-level message, then panic with the rendered line.
///
/// ```should_panic
/// # use chainlog::{Flags, Logger};
/// # let logger = Logger::new(std::io::sink(), "", Flags::NONE);
/// use chainlog::panic_log;
/// panic_log!(logger, "invariant broken: {}", "queue empty");
/// ```
#[macro_export]
macro_rules! panic_log {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::panicf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Flags, LogLevel, Logger};
    use crate::sinks::MemorySink;
    use std::sync::Arc;

    fn memory_logger() -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Logger::from_sink(sink.clone(), "", Flags::NONE), sink)
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = memory_logger();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Warn, "Formatted: {}", 42);

        let lines = sink.lines();
        assert!(lines[0].ends_with("[info] [[]] Test message"));
        assert!(lines[1].ends_with("[warn] [[]] Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = memory_logger();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let lines = sink.lines();
        assert!(lines[0].ends_with("[debug] [[]] Count: 5"));
        assert!(lines[1].ends_with("[info] [[]] Items: 100"));
        assert!(lines[2].ends_with("[warn] [[]] Retry 1 of 3"));
        assert!(lines[3].ends_with("[error] [[]] Code: 500"));
    }

    #[test]
    fn test_macro_accepts_derived_logger_expression() {
        let (logger, sink) = memory_logger();
        info!(logger.with_field("k", "v"), "derived");
        assert!(sink.lines()[0].ends_with("derived"));
    }

    #[test]
    #[should_panic(expected = "fell over")]
    fn test_panic_log_macro() {
        let (logger, _) = memory_logger();
        panic_log!(logger, "fell {}", "over");
    }
}
