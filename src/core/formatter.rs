//! Record formatting
//!
//! Both handler kinds render a record the same way:
//!
//! ```text
//! [2026-10-19T08:30:45.123Z] [WARNING ] app.db: pool exhausted | error: timed out; caused by: ...
//! ```
//!
//! The timestamp is rendered in local time unless `use_utc` is set. Messages
//! and attached error chains can be truncated.

use super::record::{ErrorReport, LogRecord};
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of error-chain frames kept when rendering attached errors
pub const DEFAULT_TRUNCATE_STACK_TRACES: usize = 30;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logging_facade::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Compact.format(&at, true), "20250108-10:30:45.000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z` or `...+02:00` in local time
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds
    Iso8601Micros,

    /// Compact sortable form: `20250108-10:30:45.123`
    Compact,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a UTC instant, converting to local time unless `use_utc` is set
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>, use_utc: bool) -> String {
        if use_utc {
            self.render(datetime)
        } else {
            self.render(&datetime.with_timezone(&Local))
        }
    }

    fn render<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Iso8601 => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Iso8601Micros => {
                datetime.to_rfc3339_opts(SecondsFormat::Micros, true)
            }
            TimestampFormat::Compact => datetime.format("%Y%m%d-%H:%M:%S%.3f").to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Formatting options shared by every handler
///
/// # Examples
///
/// ```
/// use logging_facade::FormatterConfig;
///
/// let config = FormatterConfig::new()
///     .with_utc(true)
///     .with_truncate_message_at(200)
///     .with_truncate_stack_trace_at(5);
/// assert!(config.use_utc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    pub timestamp_format: TimestampFormat,
    pub use_utc: bool,
    /// Maximum message length in characters, 0 = unlimited
    pub truncate_message_at: usize,
    /// Maximum number of error-chain frames, 0 = unlimited
    pub truncate_stack_trace_at: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            use_utc: false,
            truncate_message_at: 0,
            truncate_stack_trace_at: DEFAULT_TRUNCATE_STACK_TRACES,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_utc(mut self, use_utc: bool) -> Self {
        self.use_utc = use_utc;
        self
    }

    #[must_use]
    pub fn with_truncate_message_at(mut self, chars: usize) -> Self {
        self.truncate_message_at = chars;
        self
    }

    #[must_use]
    pub fn with_truncate_stack_trace_at(mut self, frames: usize) -> Self {
        self.truncate_stack_trace_at = frames;
        self
    }

    /// Render the record as a single line without the trailing newline
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> String {
        self.render_line(record, &format!("{:<8}", record.level), &record.timestamp)
    }

    /// Render with a caller-supplied level column (used for coloured console output)
    pub(crate) fn format_with_level(&self, record: &LogRecord, level: &str) -> String {
        self.render_line(record, level, &record.timestamp)
    }

    /// Render with `at` in place of the record's own timestamp
    pub(crate) fn format_at(&self, record: &LogRecord, at: &DateTime<Utc>) -> String {
        self.render_line(record, &format!("{:<8}", record.level), at)
    }

    fn render_line(&self, record: &LogRecord, level: &str, at: &DateTime<Utc>) -> String {
        let timestamp = self.timestamp_format.format(at, self.use_utc);
        let name = if record.logger_name.is_empty() {
            "root"
        } else {
            record.logger_name.as_str()
        };

        let mut line = format!(
            "[{}] [{}] {}: {}",
            timestamp,
            level,
            name,
            truncate(&record.message, self.truncate_message_at)
        );

        if let Some(ref error) = record.error {
            line.push_str(" | ");
            line.push_str(&self.format_error(error));
        }
        line
    }

    fn format_error(&self, error: &ErrorReport) -> String {
        let mut out = format!("error: {}", error.message);
        let limit = self.truncate_stack_trace_at;
        let shown = if limit == 0 {
            error.causes.len()
        } else {
            error.causes.len().min(limit)
        };
        for cause in &error.causes[..shown] {
            out.push_str("; caused by: ");
            out.push_str(cause);
        }
        let hidden = error.causes.len() - shown;
        if hidden > 0 {
            out.push_str(&format!(" (...{} more...)", hidden));
        }
        out
    }
}

fn truncate(message: &str, max_chars: usize) -> std::borrow::Cow<'_, str> {
    if max_chars == 0 {
        return message.into();
    }
    match message.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &message[..cut]).into(),
        None => message.into(),
    }
}
