//! Startup wiring for the process-wide logger
//!
//! A host reads [`LogSettings`] from wherever it keeps its configuration,
//! assembles a [`LogFileBase`], and calls [`setup_logger`] once at startup.

use crate::core::{Flags, Logger, LoggerError, OutputFormat, Result};
use crate::global;
use crate::sinks::{RotatingFileSink, RotationPolicy};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

fn default_local_time() -> bool {
    true
}

/// Logger section of the host's configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    /// Fallback file name when [`LogFileBase::file_name`] is empty
    pub file_name: String,
    pub max_size_mb: u64,
    pub max_age_days: u32,
    #[serde(default)]
    pub max_backups: usize,
    #[serde(default)]
    pub compress: bool,
    #[serde(default = "default_local_time")]
    pub local_time: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl LogSettings {
    pub fn new(file_name: impl Into<String>, max_size_mb: u64, max_age_days: u32) -> Self {
        Self {
            file_name: file_name.into(),
            max_size_mb,
            max_age_days,
            max_backups: 0,
            compress: false,
            local_time: true,
            format: OutputFormat::Text,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl From<&LogSettings> for RotationPolicy {
    fn from(settings: &LogSettings) -> Self {
        RotationPolicy::new()
            .with_max_size_mb(settings.max_size_mb)
            .with_max_age_days(settings.max_age_days)
            .with_max_backups(settings.max_backups)
            .with_compression(settings.compress)
            .with_local_time(settings.local_time)
    }
}

/// Directory, name and extension of the log file, assembled by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogFileBase {
    pub save_path: PathBuf,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_ext: String,
}

impl LogFileBase {
    pub fn new(
        save_path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        file_ext: impl Into<String>,
    ) -> Self {
        Self {
            save_path: save_path.into(),
            file_name: file_name.into(),
            file_ext: file_ext.into(),
        }
    }

    /// `<save_path>/<file_name><file_ext>`, taking the name from `settings`
    /// when this base has none.
    pub fn resolve(&self, settings: &LogSettings) -> Result<PathBuf> {
        let name = if self.file_name.is_empty() {
            settings.file_name.as_str()
        } else {
            self.file_name.as_str()
        };
        if name.is_empty() {
            return Err(LoggerError::config("LogFileBase", "log file name is empty"));
        }
        Ok(self.save_path.join(format!("{}{}", name, self.file_ext)))
    }
}

/// Open the rotating file sink described by `settings` and `base`.
pub fn open_sink(settings: &LogSettings, base: &LogFileBase) -> Result<RotatingFileSink> {
    let path = base.resolve(settings)?;
    RotatingFileSink::with_policy(path, RotationPolicy::from(settings))
}

/// Build the rotating-file logger and install it as the process-wide logger.
///
/// The installed logger carries the caller of this function as its callers
/// entry.
///
/// # Errors
///
/// - [`LoggerError::InvalidConfiguration`] when `settings` is `None` or no file
///   name can be resolved
/// - a sink error when the log file cannot be opened
/// - [`LoggerError::AlreadyInitialized`] on a second successful call, before
///   anything is created on disk
#[inline(never)]
pub fn setup_logger(settings: Option<&LogSettings>, base: &LogFileBase) -> Result<()> {
    let settings =
        settings.ok_or_else(|| LoggerError::config("LogSettings", "settings are missing"))?;
    if global::is_initialized() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let sink = open_sink(settings, base)?;

    let logger = Logger::from_sink(Arc::new(sink), "", Flags::STD)
        .with_format(settings.format)
        .with_caller(2);
    global::set_logger(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let settings = LogSettings::new("fallback", 10, 7);
        let base = LogFileBase::new("storage/logs", "app", ".log");
        assert_eq!(
            base.resolve(&settings).unwrap(),
            PathBuf::from("storage/logs").join("app.log")
        );

        let base = LogFileBase::new("storage/logs", "", ".log");
        assert_eq!(
            base.resolve(&settings).unwrap(),
            PathBuf::from("storage/logs").join("fallback.log")
        );
    }

    #[test]
    fn test_resolve_without_name_fails() {
        let settings = LogSettings::new("", 10, 7);
        let base = LogFileBase::new("logs", "", ".log");
        assert!(matches!(
            base.resolve(&settings),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_missing_settings_rejected() {
        let base = LogFileBase::new("logs", "app", ".log");
        let err = setup_logger(None, &base).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(!global::is_initialized());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: LogSettings = serde_json::from_str(
            r#"{"file_name": "app", "max_size_mb": 600, "max_age_days": 10, "format": "json"}"#,
        )
        .unwrap();
        assert_eq!(settings.max_size_mb, 600);
        assert_eq!(settings.max_backups, 0);
        assert!(settings.local_time);
        assert_eq!(settings.format, OutputFormat::Json);

        let policy = RotationPolicy::from(&settings);
        assert_eq!(policy.max_bytes(), 600 * 1024 * 1024);
        assert_eq!(policy.max_age_days, 10);
    }

    #[test]
    fn test_open_sink_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings::new("app", 1, 1);
        let base = LogFileBase::new(dir.path().join("logs"), "", ".log");

        let sink = open_sink(&settings, &base).unwrap();
        assert_eq!(sink.path(), dir.path().join("logs").join("app.log"));
        assert!(sink.path().exists());
    }
}
