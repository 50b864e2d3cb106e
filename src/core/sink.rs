//! Sink trait for log output destinations
//!
//! Every logger derived from the same root shares one sink and may write to it
//! from any thread. The logger does no locking of its own: each
//! implementation must make a single `write_line` call atomic with respect to
//! other lines.

use super::error::Result;

pub trait Sink: Send + Sync {
    /// Write one complete line, including its trailing newline.
    fn write_line(&self, line: &[u8]) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
