//! # chainlog
//!
//! Leveled, structured logging built around immutable logger snapshots.
//!
//! ## Features
//!
//! - **Chainable**: `with_fields`, `with_context`, `with_caller` and
//!   `with_callers_frames` each return a new logger sharing the same sink
//! - **Two renderings**: a bracketed text line or a flat JSON document
//! - **Severity actions**: `fatal` exits the process, `panic` unwinds
//! - **Process-wide logger**: installed once by [`setup::setup_logger`], used
//!   through free functions such as [`global::info`]
//!
//! ```
//! use chainlog::{Flags, Logger, OutputFormat};
//! use chainlog::sinks::MemorySink;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let root = Logger::from_sink(sink.clone(), "", Flags::NONE);
//! let request = root
//!     .with_format(OutputFormat::Json)
//!     .with_field("request_id", "abc-123");
//!
//! request.info("handled");
//! assert!(sink.lines()[0].contains(r#""request_id":"abc-123""#));
//! ```
//!
//! ## Sinks
//!
//! All loggers derived from one root write through one [`Sink`]. The logger
//! does not serialize writers itself; a sink must keep each `write_line` call
//! atomic with respect to concurrent calls. The bundled sinks do so with a lock
//! around the underlying writer.

pub mod core;
pub mod global;
pub mod macros;
pub mod setup;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Context, FieldValue, Fields, Flags, LogLevel, Logger, LoggerBuilder, LoggerError,
        OutputFormat, Record, Result, Sink,
    };
    pub use crate::setup::{setup_logger, LogFileBase, LogSettings};
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, RotatingFileSink, RotationPolicy};
}

pub use crate::core::{
    CallerFrame, Context, FieldValue, Fields, Flags, LogLevel, Logger, LoggerBuilder, LoggerError,
    Output, OutputFormat, Record, Result, SeverityAction, Sink, DEFAULT_MAX_CALLER_DEPTH,
};
pub use setup::{setup_logger, LogFileBase, LogSettings};
