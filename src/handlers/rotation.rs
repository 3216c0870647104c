//! Roll policies for file handlers
//!
//! Boundaries are wall-clock based: the top of the hour, midnight, or the
//! midnight at which a chosen weekday begins. They are evaluated in UTC when
//! the handler renders UTC timestamps and in local time otherwise.

use crate::core::LoggerError;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// When a file handler closes its current file and starts a new one
///
/// # Examples
///
/// ```
/// use logging_facade::handlers::RollPolicy;
/// use chrono::Weekday;
///
/// assert_eq!("Daily".parse::<RollPolicy>().unwrap(), RollPolicy::Daily);
/// assert_eq!("sunday".parse::<RollPolicy>().unwrap(), RollPolicy::Weekly(Weekday::Sun));
/// assert!("fortnightly".parse::<RollPolicy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollPolicy {
    #[default]
    Never,
    Hourly,
    Daily,
    Weekly(Weekday),
}

impl RollPolicy {
    /// First boundary strictly after `after`, or `None` for [`RollPolicy::Never`]
    pub fn next_rollover(&self, after: DateTime<Utc>, use_utc: bool) -> Option<DateTime<Utc>> {
        if use_utc {
            self.next_in(&after)
        } else {
            self.next_in(&after.with_timezone(&Local))
        }
    }

    fn next_in<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let wall = after.naive_local();
        let today = wall.date();
        let boundary: NaiveDateTime = match self {
            RollPolicy::Never => return None,
            RollPolicy::Hourly => today.and_hms_opt(wall.hour(), 0, 0)? + Duration::hours(1),
            RollPolicy::Daily => today.succ_opt()?.and_hms_opt(0, 0, 0)?,
            RollPolicy::Weekly(day) => {
                let ahead = (7 + day.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
                let ahead = if ahead == 0 { 7 } else { ahead };
                (today + Duration::days(i64::from(ahead))).and_hms_opt(0, 0, 0)?
            }
        };

        // A boundary inside a DST gap does not exist locally; take the next hour.
        let tz = after.timezone();
        let resolved = tz
            .from_local_datetime(&boundary)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(boundary + Duration::hours(1))).earliest())?;
        Some(resolved.with_timezone(&Utc))
    }

    /// Date stamp used in the name of a file covering the period starting at `start`
    pub fn archive_stamp(&self, start: DateTime<Utc>, use_utc: bool) -> String {
        let pattern = match self {
            RollPolicy::Hourly => "%Y%m%d-%H",
            _ => "%Y%m%d",
        };
        if use_utc {
            start.format(pattern).to_string()
        } else {
            start.with_timezone(&Local).format(pattern).to_string()
        }
    }
}

impl fmt::Display for RollPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollPolicy::Never => f.write_str("never"),
            RollPolicy::Hourly => f.write_str("hourly"),
            RollPolicy::Daily => f.write_str("daily"),
            RollPolicy::Weekly(day) => f.write_str(weekday_name(*day)),
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl FromStr for RollPolicy {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(RollPolicy::Never),
            "hourly" => Ok(RollPolicy::Hourly),
            "daily" => Ok(RollPolicy::Daily),
            "sunday" => Ok(RollPolicy::Weekly(Weekday::Sun)),
            "monday" => Ok(RollPolicy::Weekly(Weekday::Mon)),
            "tuesday" => Ok(RollPolicy::Weekly(Weekday::Tue)),
            "wednesday" => Ok(RollPolicy::Weekly(Weekday::Wed)),
            "thursday" => Ok(RollPolicy::Weekly(Weekday::Thu)),
            "friday" => Ok(RollPolicy::Weekly(Weekday::Fri)),
            "saturday" => Ok(RollPolicy::Weekly(Weekday::Sat)),
            _ => Err(LoggerError::invalid_config(format!(
                "unrecognized roll policy '{}' (expected never, hourly, daily or a day of the week)",
                s
            ))),
        }
    }
}

/// `logs/app.log` with stamp `20261019` becomes `logs/app-20261019.log`
pub fn archive_path(base: &Path, stamp: &str) -> PathBuf {
    let (stem, ext) = split_file_name(base);
    base.with_file_name(format!("{}-{}{}", stem, stamp, ext))
}

/// Whether `file_name` looks like an archive produced from `base`
pub fn is_archive_of(base: &Path, file_name: &str) -> bool {
    let (stem, ext) = split_file_name(base);
    let Some(rest) = file_name.strip_prefix(&format!("{}-", stem)) else {
        return false;
    };
    let Some(stamp) = rest.strip_suffix(ext.as_str()) else {
        return false;
    };
    !stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '.')
}

fn split_file_name(base: &Path) -> (String, String) {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("app")
        .to_string();
    let ext = base
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    (stem, ext)
}
