//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and hand the message to
//! a [`Logger`](crate::Logger). Each evaluates to the `Result<()>` of the
//! underlying call, so handler I/O failures reach the caller.
//!
//! An error can be attached with `err = <expr>;` before the format string.
//!
//! # Examples
//!
//! ```
//! use logging_facade::{get_logger, info, error};
//!
//! let logger = get_logger("doc.macros");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! error!(logger, err = &io; "Could not persist {} rows", 12).unwrap();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// use logging_facade::{get_logger, log, Level};
///
/// let logger = get_logger("doc.log");
/// log!(logger, Level::Info, "Simple message").unwrap();
/// log!(logger, Level::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, err = $err:expr; $($arg:tt)+) => {
        $logger.log_with_error($level, $err, format!($($arg)+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// use logging_facade::{get_logger, error};
///
/// let logger = get_logger("doc.error");
/// error!(logger, "Failed to connect to database").unwrap();
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, err = $err; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}

/// The logger named after the calling module (`my_app::db` -> `my_app.db`).
///
/// # Examples
///
/// ```
/// let logger = logging_facade::module_logger!();
/// assert!(!logger.name().contains("::"));
/// ```
#[macro_export]
macro_rules! module_logger {
    () => {
        $crate::get_logger(&$crate::logger_name_for_module(module_path!()))
    };
}
