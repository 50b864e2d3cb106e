//! Line writer shared by every logger derived from one root
//!
//! Prepends the optional prefix and date/time header selected by [`Flags`],
//! terminates the line, and hands it to the sink in a single call.

use super::error::Result;
use super::sink::Sink;
use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;

/// Header options for the line writer.
///
/// These only control the header in front of each line; the record's own
/// `time` field is always present regardless of them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// Local date: `2009/01/23`
    pub const DATE: Flags = Flags(1);
    /// Local time: `01:23:23`
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Use UTC rather than the local time zone
    pub const UTC: Flags = Flags(1 << 5);
    /// Move the prefix from the beginning of the line to before the message
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Flags(bits)
    }

    #[must_use]
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({:#b})", self.0)
    }
}

pub struct Output {
    sink: Arc<dyn Sink>,
    prefix: String,
    flags: Flags,
}

impl Output {
    pub fn new(sink: Arc<dyn Sink>, prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            sink,
            prefix: prefix.into(),
            flags,
        }
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Build the full line for `message` as of `now`, newline included.
    pub fn format_line(&self, now: DateTime<Local>, message: &str) -> String {
        let mut line = String::with_capacity(self.prefix.len() + message.len() + 28);
        if !self.flags.contains(Flags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        let wants_time = self.flags.contains(Flags::TIME) || self.flags.contains(Flags::MICROSECONDS);
        if self.flags.contains(Flags::DATE) || wants_time {
            let stamp = if self.flags.contains(Flags::UTC) {
                now.with_timezone(&Utc).naive_local()
            } else {
                now.naive_local()
            };
            if self.flags.contains(Flags::DATE) {
                line.push_str(&stamp.format("%Y/%m/%d ").to_string());
            }
            if wants_time {
                line.push_str(&stamp.format("%H:%M:%S").to_string());
                if self.flags.contains(Flags::MICROSECONDS) {
                    line.push_str(&stamp.format("%.6f").to_string());
                }
                line.push(' ');
            }
        }

        if self.flags.contains(Flags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }
        line.push_str(message);
        if !message.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    /// Write one line. Sink failures are the sink's concern and are dropped here.
    pub fn print(&self, message: &str) {
        let line = self.format_line(Local::now(), message);
        let _ = self.sink.write_line(line.as_bytes());
    }

    /// Write, flush, and exit the process with status 1.
    pub fn fatal(&self, message: &str) -> ! {
        self.print(message);
        let _ = self.sink.flush();
        std::process::exit(1)
    }

    /// Write, then unwind with `message` as the `String` panic payload.
    pub fn panic(&self, message: String) -> ! {
        self.print(&message);
        let _ = self.sink.flush();
        std::panic::panic_any(message)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("sink", &self.sink.name())
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish()
    }
}
