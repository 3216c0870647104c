//! Severity levels
//!
//! The level set is closed: seven named levels with fixed integer ranks.
//! Filtering compares ranks with `>=`, so a logger set to `Warning` accepts
//! `Warning`, `Error`, `Critical` and `Fatal` records.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 400,
    Debug = 500,
    #[default]
    Info = 800,
    Warning = 900,
    Error = 930,
    Critical = 970,
    Fatal = 1000,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Fatal,
    ];

    #[inline]
    pub const fn rank(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Fatal => "FATAL",
        }
    }

    /// Look up a level by name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_facade::Level;
    ///
    /// assert_eq!(Level::lookup("debug").unwrap(), Level::Debug);
    /// assert!(Level::lookup("verbose").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<Self, LoggerError> {
        name.parse()
    }

    /// Whether a record at `record_level` passes a threshold of `self`.
    #[inline]
    pub const fn accepts(self, record_level: Level) -> bool {
        record_level.rank() >= self.rank()
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Trace => BrightBlack,
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warning => Yellow,
            Level::Error => Red,
            Level::Critical => Magenta,
            Level::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(LoggerError::unknown_level(s)),
        }
    }
}
