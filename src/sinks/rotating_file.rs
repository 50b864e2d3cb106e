//! Size-rotated file sink with age-based backup retention
//!
//! When a write would push the active file past `max_size_mb`, the file is
//! renamed to `<stem>-<timestamp><ext>` (for example
//! `app-2025-01-08T10-30-45.123.log`) and a fresh file is opened under the
//! original name. After each rotation, backups older than `max_age_days` or
//! beyond the newest `max_backups` are removed, and the rest are optionally
//! gzip-compressed.

use crate::core::{LoggerError, Result, Sink};
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, Utc};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MEGABYTE: u64 = 1024 * 1024;
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";

/// Configuration for rotating file sink
///
/// # Examples
///
/// ```
/// use chainlog::sinks::RotationPolicy;
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_age_days(7)
///     .with_max_backups(10)
///     .with_compression(true);
/// assert_eq!(policy.max_bytes(), 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the active file would exceed this size. 0 means 100 MB.
    pub max_size_mb: u64,
    /// Remove backups older than this many days. 0 keeps them regardless of age.
    pub max_age_days: u32,
    /// Keep at most this many backups. 0 keeps them regardless of count.
    pub max_backups: usize,
    /// Gzip rotated backups
    pub compress: bool,
    /// Stamp backup names with local time instead of UTC
    pub local_time: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_age_days: 0,
            max_backups: 0,
            compress: false,
            local_time: true,
        }
    }
}

impl RotationPolicy {
    /// Create a new rotation policy with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, size_mb: u64) -> Self {
        self.max_size_mb = size_mb;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_local_time(mut self, enabled: bool) -> Self {
        self.local_time = enabled;
        self
    }

    /// Effective size limit in bytes
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        let mb = if self.max_size_mb == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size_mb
        };
        mb.saturating_mul(MEGABYTE)
    }

    fn now(&self) -> NaiveDateTime {
        if self.local_time {
            Local::now().naive_local()
        } else {
            Utc::now().naive_utc()
        }
    }
}

struct ActiveFile {
    file: Option<File>,
    size: u64,
}

/// Rotating file sink
///
/// # Examples
///
/// ```no_run
/// use chainlog::sinks::{RotatingFileSink, RotationPolicy};
///
/// let policy = RotationPolicy::new().with_max_size_mb(10).with_max_age_days(28);
/// let sink = RotatingFileSink::with_policy("/var/log/app.log", policy).unwrap();
/// ```
pub struct RotatingFileSink {
    base_path: PathBuf,
    policy: RotationPolicy,
    max_bytes: u64,
    active: Mutex<ActiveFile>,
}

impl RotatingFileSink {
    /// Create a new rotating file sink with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a new rotating file sink with custom policy
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created or opened
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, size) = Self::open_active(&base_path)?;
        let max_bytes = policy.max_bytes();

        Ok(Self {
            base_path,
            policy,
            max_bytes,
            active: Mutex::new(ActiveFile {
                file: Some(file),
                size,
            }),
        })
    }

    fn open_active(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();
        Ok((file, size))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Bytes written to the active file
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.active.lock().size
    }

    /// Force a rotation now, regardless of size
    pub fn rotate(&self) -> Result<()> {
        let mut active = self.active.lock();
        self.rotate_locked(&mut active)
    }

    fn rotate_locked(&self, active: &mut ActiveFile) -> Result<()> {
        if let Some(file) = active.file.take() {
            file.sync_all().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to sync before rotation: {}", e),
                )
            })?;
        }

        let rename_result = if self.base_path.exists() {
            let mut at = self.policy.now();
            let mut backup = self.backup_path(at);
            // two rotations inside one millisecond must not share a name
            while backup.exists() {
                at += ChronoDuration::milliseconds(1);
                backup = self.backup_path(at);
            }
            fs::rename(&self.base_path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })
        } else {
            Ok(())
        };

        // reopen even when the rename failed so logging can continue
        let (file, size) = Self::open_active(&self.base_path)?;
        active.file = Some(file);
        active.size = size;
        rename_result?;

        self.prune_backups();
        Ok(())
    }

    fn name_parts(&self) -> (String, String) {
        let stem = self
            .base_path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string();
        let ext = self
            .base_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (stem, ext)
    }

    fn backup_path(&self, at: NaiveDateTime) -> PathBuf {
        let (stem, ext) = self.name_parts();
        self.base_path.with_file_name(format!(
            "{}-{}{}",
            stem,
            at.format(BACKUP_TIME_FORMAT),
            ext
        ))
    }

    /// Rotated backups next to the active file, newest first
    pub fn backups(&self) -> Vec<PathBuf> {
        let mut found = self.scan_backups();
        found.sort_by(|a, b| b.0.cmp(&a.0));
        found.into_iter().map(|(_, path)| path).collect()
    }

    fn scan_backups(&self) -> Vec<(NaiveDateTime, PathBuf)> {
        let (stem, ext) = self.name_parts();
        let head = format!("{}-", stem);
        let dir = match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let rest = name.strip_prefix(&head)?;
                let rest = rest.strip_suffix(COMPRESS_SUFFIX).unwrap_or(rest);
                let stamp = rest.strip_suffix(&ext)?;
                let at = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).ok()?;
                Some((at, entry.path()))
            })
            .collect()
    }

    fn prune_backups(&self) {
        let mut backups = self.scan_backups();
        backups.sort_by(|a, b| b.0.cmp(&a.0));

        let cutoff = (self.policy.max_age_days > 0).then(|| {
            self.policy.now() - ChronoDuration::days(i64::from(self.policy.max_age_days))
        });

        let mut kept = Vec::new();
        for (index, (at, path)) in backups.into_iter().enumerate() {
            let too_many = self.policy.max_backups > 0 && index >= self.policy.max_backups;
            let too_old = cutoff.is_some_and(|cutoff| at < cutoff);
            if too_many || too_old {
                if let Err(e) = fs::remove_file(&path) {
                    eprintln!("[WARN] Failed to remove old backup {}: {}", path.display(), e);
                }
            } else {
                kept.push(path);
            }
        }

        if self.policy.compress {
            for path in kept {
                let is_compressed = path
                    .to_str()
                    .is_some_and(|p| p.ends_with(COMPRESS_SUFFIX));
                if !is_compressed {
                    if let Err(e) = compress_file(&path) {
                        eprintln!("[WARN] Failed to compress backup {}: {}", path.display(), e);
                    }
                }
            }
        }
    }
}

/// Gzip `path` to `<path>.gz`, removing the original only after success.
#[cfg(feature = "compression")]
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(COMPRESS_SUFFIX);
    let gz_path = PathBuf::from(gz_name);
    let mut tmp_name = gz_path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&tmp_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", tmp_path.display()),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let streamed = std::io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut writer| writer.flush());
    if let Err(e) = streamed {
        let _ = fs::remove_file(&tmp_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&tmp_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }
    Ok(())
}

#[cfg(not(feature = "compression"))]
fn compress_file(path: &Path) -> Result<()> {
    Err(LoggerError::config(
        "RotationPolicy",
        format!(
            "cannot compress {}: built without the `compression` feature",
            path.display()
        ),
    ))
}

impl Sink for RotatingFileSink {
    fn write_line(&self, line: &[u8]) -> Result<()> {
        let len = line.len() as u64;
        if len > self.max_bytes {
            return Err(LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.max_bytes
                ),
            ));
        }

        let mut active = self.active.lock();
        if active.size + len > self.max_bytes {
            if let Err(e) = self.rotate_locked(&mut active) {
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);
                if active.file.is_none() {
                    return Err(e);
                }
                // let the file outgrow the limit rather than retry on every line
                active.size = 0;
            }
        }

        let file = active
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::file_sink(self.base_path.display().to_string(), "Writer not initialized"))?;
        file.write_all(line).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        active.size += len;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(file) = self.active.lock().file.as_mut() {
            file.sync_data().map_err(|e| {
                LoggerError::file_sink(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "rotating_file"
    }
}
