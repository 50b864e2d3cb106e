//! In-memory sink for tests and diagnostics

use crate::core::{Result, Sink};
use parking_lot::Mutex;

/// Keeps every written line, without its trailing newline.
///
/// # Example
///
/// ```
/// use chainlog::{Flags, Logger};
/// use chainlog::sinks::MemorySink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::from_sink(sink.clone(), "", Flags::NONE);
/// logger.info("hello");
///
/// assert!(sink.lines()[0].ends_with("[info] [[]] hello"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Take the lines written so far, leaving the sink empty
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    /// All lines joined with newlines
    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(line);
        let trimmed = text.strip_suffix('\n').unwrap_or(&*text);
        self.lines.lock().push(trimmed.to_string());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
