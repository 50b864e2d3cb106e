//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod rotating_file;
pub mod writer;

pub use console::{ConsoleSink, ConsoleTarget};
pub use file::FileSink;
pub use memory::MemorySink;
pub use rotating_file::{RotatingFileSink, RotationPolicy};
pub use writer::WriterSink;

pub use crate::core::Sink;
