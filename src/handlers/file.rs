//! File handler with time-based rotation
//!
//! The target file is opened on the first record, not at construction, so a
//! handler can be built and thrown away (e.g. while pre-flighting a
//! configuration) without touching the filesystem.
//!
//! On rotation the current file is renamed to a date-stamped archive
//! (`app.log` -> `app-20261019.log`) and a fresh file is opened at the
//! original path. If any step fails the previous handle keeps receiving
//! records and the error is returned from the write that triggered it.
//!
//! An existing archive is never overwritten; a second archive for the same
//! period gets a sequence number (`app-20261019.1.log`). When the live path no
//! longer names the file this handler has open (another handler on the same
//! path rotated it first, or an earlier rotation renamed it but could not
//! create the replacement), the handler reopens the path instead of renaming.

use super::rotation::{archive_path, is_archive_of, RollPolicy};
use crate::core::{Clock, FormatterConfig, Handler, LogRecord, LoggerError, Result, SystemClock};
use chrono::{DateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Appends formatted records to a file, rolling it over per [`RollPolicy`]
///
/// # Examples
///
/// ```no_run
/// use logging_facade::handlers::{FileHandler, RollPolicy};
/// use logging_facade::{get_logger, SharedHandler};
///
/// let handler = FileHandler::new("/var/log/app.log", RollPolicy::Daily).with_max_archives(7);
/// get_logger("app").add_handler(SharedHandler::new(handler));
/// ```
pub struct FileHandler {
    path: PathBuf,
    policy: RollPolicy,
    formatter: FormatterConfig,
    clock: Arc<dyn Clock>,
    stamp_with_clock: bool,
    max_archives: Option<usize>,
    writer: Option<LineWriter<File>>,
    /// Start of the period the open file covers
    period_start: Option<DateTime<Utc>>,
    next_rollover: Option<DateTime<Utc>>,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>, policy: RollPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            formatter: FormatterConfig::default(),
            clock: Arc::new(SystemClock),
            stamp_with_clock: false,
            max_archives: None,
            writer: None,
            period_start: None,
            next_rollover: None,
        }
    }

    /// Drive rotation from `clock`
    ///
    /// Lines are stamped with the clock's reading too, so every line carries a
    /// time inside the period of the file it lands in.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self.stamp_with_clock = true;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Keep at most `count` archives, deleting the oldest after each rotation
    #[must_use]
    pub fn with_max_archives(mut self, count: usize) -> Self {
        self.max_archives = Some(count);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> RollPolicy {
        self.policy
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    pub fn next_rollover(&self) -> Option<DateTime<Utc>> {
        self.next_rollover
    }

    fn open_append(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    fn open(&mut self, now: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::handler_io(
                    "file",
                    format!("creating log directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = Self::open_append(&self.path).map_err(|e| {
            LoggerError::handler_io("file", format!("opening '{}'", self.path.display()), e)
        })?;

        // A file carried over from an earlier run covers the period it was last written in
        let period_start = file
            .metadata()
            .ok()
            .filter(|m| m.len() > 0)
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from)
            .map_or(now, |modified| modified.min(now));

        self.writer = Some(LineWriter::new(file));
        self.period_start = Some(period_start);
        self.next_rollover = self.policy.next_rollover(period_start, self.formatter.use_utc);
        Ok(())
    }

    fn roll(&mut self, now: DateTime<Utc>) -> Result<()> {
        let period_start = self.period_start.unwrap_or(now);
        self.next_rollover = self.policy.next_rollover(now, self.formatter.use_utc);

        if let Some(ref mut writer) = self.writer {
            writer
                .flush()
                .map_err(|e| LoggerError::rotation(&self.path, "cannot flush before rotation", e))?;
        }

        if self.owns_path() {
            let archive = self.free_archive_path(period_start);
            fs::rename(&self.path, &archive).map_err(|e| {
                LoggerError::rotation(
                    &self.path,
                    format!("cannot rename to '{}'", archive.display()),
                    e,
                )
            })?;
        }

        // Until the new file opens, the old handle keeps writing wherever it now lives
        let file = Self::open_append(&self.path)
            .map_err(|e| LoggerError::rotation(&self.path, "cannot create new log file", e))?;
        self.writer = Some(LineWriter::new(file));
        self.period_start = Some(now);

        if let Some(max) = self.max_archives {
            self.prune_archives(max);
        }
        Ok(())
    }

    /// Whether the live path still names the file behind `self.writer`
    fn owns_path(&self) -> bool {
        let on_disk = match fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return false,
            // let the rename report it
            Err(_) => return true,
        };
        match self.writer {
            Some(ref writer) => writer
                .get_ref()
                .metadata()
                .map_or(true, |open| same_file(&open, &on_disk)),
            None => true,
        }
    }

    /// Archive name for the period, numbered when the plain name is taken
    fn free_archive_path(&self, period_start: DateTime<Utc>) -> PathBuf {
        let stamp = self.policy.archive_stamp(period_start, self.formatter.use_utc);
        let mut archive = archive_path(&self.path, &stamp);
        let mut seq = 1;
        while archive.exists() {
            archive = archive_path(&self.path, &format!("{}.{}", stamp, seq));
            seq += 1;
        }
        archive
    }

    fn prune_archives(&self, keep: usize) {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[LOGGER WARN] Cannot list '{}' to prune old log archives: {}",
                    dir.display(),
                    e
                );
                return;
            }
        };

        let mut archives: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| is_archive_of(&self.path, name))
            })
            .map(|entry| entry.path())
            .collect();
        if archives.len() <= keep {
            return;
        }

        // stamps sort chronologically
        archives.sort();
        let excess = archives.len() - keep;
        for old in &archives[..excess] {
            if let Err(e) = fs::remove_file(old) {
                eprintln!(
                    "[LOGGER WARN] Failed to remove old log archive {}: {}",
                    old.display(),
                    e
                );
            }
        }
    }
}

impl Handler for FileHandler {
    fn publish(&mut self, record: &LogRecord) -> Result<()> {
        let now = self.clock.now();
        if self.writer.is_none() {
            self.open(now)?;
        }

        let mut rotation_error = None;
        if self.next_rollover.is_some_and(|at| now >= at) {
            if let Err(e) = self.roll(now) {
                eprintln!(
                    "[LOGGER WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                rotation_error = Some(e);
            }
        }

        let line = if self.stamp_with_clock {
            self.formatter.format_at(record, &now)
        } else {
            self.formatter.format(record)
        };
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::handler_io("file", "writing record", closed_error()))?;
        writeln!(writer, "{}", line).map_err(|e| {
            LoggerError::handler_io("file", format!("writing to '{}'", self.path.display()), e)
        })?;

        rotation_error.map_or(Ok(()), Err)
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::handler_io("file", format!("flushing '{}'", self.path.display()), e)
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn formatter(&self) -> &FormatterConfig {
        &self.formatter
    }

    fn formatter_mut(&mut self) -> &mut FormatterConfig {
        &mut self.formatter
    }
}

#[cfg(unix)]
fn same_file(a: &fs::Metadata, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

// Without inode identity fall back to the numbered-archive guard
#[cfg(not(unix))]
fn same_file(_: &fs::Metadata, _: &fs::Metadata) -> bool {
    true
}

fn closed_error() -> std::io::Error {
    std::io::Error::new(ErrorKind::NotConnected, "log file is not open")
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
