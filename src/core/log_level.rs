//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
}

/// What happens after a record has been handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityAction {
    /// Write the line and return to the caller.
    Continue,
    /// Write the line, flush, then exit the process with status 1.
    Terminate,
    /// Write the line, then unwind with the line as the panic payload.
    Unwind,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Panic,
    ];

    #[must_use]
    pub fn ordinal(self) -> i8 {
        self as i8
    }

    /// Level for a raw ordinal, or `None` outside `0..=5`.
    #[must_use]
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Error),
            4 => Some(LogLevel::Fatal),
            5 => Some(LogLevel::Panic),
            _ => None,
        }
    }

    /// Name for a raw ordinal. Unknown ordinals read as `"debug"`.
    #[must_use]
    pub fn name_of(ordinal: i64) -> &'static str {
        Self::from_ordinal(ordinal).unwrap_or_default().name()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
        }
    }

    #[must_use]
    pub fn action(self) -> SeverityAction {
        match self {
            LogLevel::Debug | LogLevel::Info | LogLevel::Warn | LogLevel::Error => {
                SeverityAction::Continue
            }
            LogLevel::Fatal => SeverityAction::Terminate,
            LogLevel::Panic => SeverityAction::Unwind,
        }
    }
}

impl From<i8> for LogLevel {
    fn from(ordinal: i8) -> Self {
        Self::from_ordinal(i64::from(ordinal)).unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
