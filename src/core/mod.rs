//! Core logger types and traits

pub mod caller;
pub mod context;
pub mod error;
pub mod fields;
pub mod log_level;
pub mod logger;
pub mod output;
pub mod output_format;
pub mod record;
pub mod sink;

pub use caller::{CallerFrame, DEFAULT_MAX_CALLER_DEPTH};
pub use context::Context;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use log_level::{LogLevel, SeverityAction};
pub use logger::{Logger, LoggerBuilder};
pub use output::{Flags, Output};
pub use output_format::OutputFormat;
pub use record::Record;
pub use sink::Sink;
