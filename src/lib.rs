//! # Logging Facade
//!
//! Named, leveled loggers arranged in a dotted-name hierarchy, with console
//! and rolling file handlers and a declarative configurator.
//!
//! ## Features
//!
//! - **Hierarchical**: `app.db` inherits its level and handlers from `app` and the root
//! - **Handlers**: standard error, or a file rolled hourly, daily or weekly
//! - **Declarative**: build a logger from a JSON block, or pre-flight one without applying it
//! - **Thread Safe**: a process-wide cache with one instance per logger name
//!
//! ## Example
//!
//! ```
//! use logging_facade::{configure, get_logger, info};
//! use serde_json::json;
//!
//! configure(&json!({"node": "example", "console": true, "level": "debug"}), false, false)
//!     .unwrap();
//! let logger = get_logger("example.worker");
//! info!(logger, "started {} workers", 4).unwrap();
//! ```

pub mod config;
pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::config::{configure, configure_json, configure_many, LoggerConfig};
    pub use crate::core::{
        clear_all_handlers, get_logger, root_logger, Handler, Level, LogRecord, Logger,
        LoggerError, Result, SharedHandler,
    };
    pub use crate::handlers::{ConsoleHandler, FileHandler, RollPolicy};
}

pub use config::{configure, configure_json, configure_many, LoggerConfig, ALLOWED_KEYS};
pub use core::{
    clear_all_handlers, get_logger, logger_name_for_module, logger_names, root_logger, Clock,
    ErrorReport, FormatterConfig, Handler, Level, LogRecord, Logger, LoggerError, ManualClock,
    Result, SharedHandler, SystemClock, TimestampFormat, DEFAULT_ROOT_LEVEL,
    DEFAULT_TRUNCATE_STACK_TRACES, ROOT_LOGGER_NAME,
};
pub use handlers::{ConsoleHandler, FileHandler, RollPolicy};
