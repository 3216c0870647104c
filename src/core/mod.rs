//! Core logger types and traits

pub mod clock;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LoggerError, Result};
pub use formatter::{FormatterConfig, TimestampFormat, DEFAULT_TRUNCATE_STACK_TRACES};
pub use handler::{Handler, SharedHandler};
pub use level::Level;
pub use logger::{Logger, DEFAULT_ROOT_LEVEL};
pub use record::{ErrorReport, LogRecord};
pub use registry::{
    clear_all_handlers, get_logger, logger_name_for_module, logger_names, root_logger,
    ROOT_LOGGER_NAME,
};
