//! Named, leveled loggers
//!
//! Loggers form a tree by dotted name: `app.db.pool` delegates to `app.db`,
//! then `app`, then the root logger `""`. Only loggers already present in the
//! registry take part, so an ancestor that was never looked up is skipped.

use super::{
    error::{LoggerError, Result},
    handler::SharedHandler,
    level::Level,
    record::LogRecord,
    registry,
};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Effective level of a tree with no level set anywhere
pub const DEFAULT_ROOT_LEVEL: Level = Level::Info;

#[derive(Debug)]
struct LoggerState {
    level: Option<Level>,
    handlers: Vec<SharedHandler>,
    use_parent_handlers: bool,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            level: None,
            handlers: Vec::new(),
            use_parent_handlers: true,
        }
    }
}

pub struct Logger {
    name: String,
    state: RwLock<LoggerState>,
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(LoggerState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Nearest registered ancestor by dotted name; `None` for the root
    pub fn parent(&self) -> Option<Arc<Logger>> {
        registry::find_parent(&self.name)
    }

    /// The level set on this logger, `None` when it inherits
    pub fn level(&self) -> Option<Level> {
        self.state.read().level
    }

    pub fn set_level(&self, level: impl Into<Option<Level>>) {
        self.state.write().level = level.into();
    }

    /// Own level, else the nearest ancestor's, else [`DEFAULT_ROOT_LEVEL`]
    pub fn effective_level(&self) -> Level {
        if let Some(level) = self.level() {
            return level;
        }
        let mut current = self.parent();
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return level;
            }
            current = logger.parent();
        }
        DEFAULT_ROOT_LEVEL
    }

    pub fn is_loggable(&self, level: Level) -> bool {
        self.effective_level().accepts(level)
    }

    pub fn use_parent_handlers(&self) -> bool {
        self.state.read().use_parent_handlers
    }

    pub fn set_use_parent_handlers(&self, use_parents: bool) {
        self.state.write().use_parent_handlers = use_parents;
    }

    pub fn add_handler(&self, handler: SharedHandler) {
        self.state.write().handlers.push(handler);
    }

    /// Detach `handler`; returns false if it was not attached here
    pub fn remove_handler(&self, handler: &SharedHandler) -> bool {
        let mut state = self.state.write();
        let before = state.handlers.len();
        state.handlers.retain(|h| !h.ptr_eq(handler));
        state.handlers.len() != before
    }

    /// Detach every handler, returning what was attached
    pub fn clear_handlers(&self) -> Vec<SharedHandler> {
        std::mem::take(&mut self.state.write().handlers)
    }

    /// Handlers attached directly to this logger
    pub fn handlers(&self) -> Vec<SharedHandler> {
        self.state.read().handlers.clone()
    }

    /// Own handlers followed by ancestors' handlers, stopping after the first
    /// logger that does not delegate to its parent.
    pub fn effective_handlers(&self) -> Vec<SharedHandler> {
        let (mut handlers, mut delegate) = {
            let state = self.state.read();
            (state.handlers.clone(), state.use_parent_handlers)
        };
        let mut current = if delegate { self.parent() } else { None };
        while let Some(logger) = current {
            {
                let state = logger.state.read();
                handlers.extend(state.handlers.iter().cloned());
                delegate = state.use_parent_handlers;
            }
            current = if delegate { logger.parent() } else { None };
        }
        handlers
    }

    /// Swap level, handlers and parent delegation in one step.
    ///
    /// Returns the handlers that were detached.
    pub(crate) fn replace_state(
        &self,
        level: Option<Level>,
        handlers: Vec<SharedHandler>,
        use_parent_handlers: bool,
    ) -> Vec<SharedHandler> {
        let mut state = self.state.write();
        state.level = level;
        state.use_parent_handlers = use_parent_handlers;
        std::mem::replace(&mut state.handlers, handlers)
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) -> Result<()> {
        if !self.is_loggable(level) {
            return Ok(());
        }
        self.dispatch(LogRecord::new(level, self.name.as_str(), message))
    }

    pub fn log_with_error(
        &self,
        level: Level,
        error: &(dyn Error + 'static),
        message: impl AsRef<str>,
    ) -> Result<()> {
        if !self.is_loggable(level) {
            return Ok(());
        }
        self.dispatch(LogRecord::new(level, self.name.as_str(), message).with_error(error))
    }

    /// Filter and dispatch a prepared record
    pub fn log_record(&self, record: LogRecord) -> Result<()> {
        if !self.is_loggable(record.level) {
            return Ok(());
        }
        self.dispatch(record)
    }

    /// Publish to every effective handler. One failing handler does not stop
    /// the rest; the first failure is returned and later ones go to stderr.
    fn dispatch(&self, record: LogRecord) -> Result<()> {
        let mut first_error: Option<LoggerError> = None;
        for handler in self.effective_handlers() {
            if let Err(e) = handler.publish(&record) {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    eprintln!(
                        "[LOGGER ERROR] Handler '{}' failed for logger '{}': {}",
                        handler.name(),
                        self.name,
                        e
                    );
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn flush(&self) -> Result<()> {
        for handler in self.effective_handlers() {
            handler.flush()?;
        }
        Ok(())
    }

    pub fn trace(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Trace, message)
    }

    pub fn debug(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warning(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Warning, message)
    }

    pub fn error(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Error, message)
    }

    pub fn critical(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Critical, message)
    }

    pub fn fatal(&self, message: impl AsRef<str>) -> Result<()> {
        self.log(Level::Fatal, message)
    }

    pub fn warning_with(
        &self,
        error: &(dyn Error + 'static),
        message: impl AsRef<str>,
    ) -> Result<()> {
        self.log_with_error(Level::Warning, error, message)
    }

    pub fn error_with(&self, error: &(dyn Error + 'static), message: impl AsRef<str>) -> Result<()> {
        self.log_with_error(Level::Error, error, message)
    }

    pub fn critical_with(
        &self,
        error: &(dyn Error + 'static),
        message: impl AsRef<str>,
    ) -> Result<()> {
        self.log_with_error(Level::Critical, error, message)
    }

    pub fn fatal_with(&self, error: &(dyn Error + 'static), message: impl AsRef<str>) -> Result<()> {
        self.log_with_error(Level::Fatal, error, message)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &state.level)
            .field("handlers", &state.handlers)
            .field("use_parent_handlers", &state.use_parent_handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::FormatterConfig;
    use crate::core::handler::Handler;
    use crate::get_logger;
    use parking_lot::Mutex;

    struct Capture {
        lines: Arc<Mutex<Vec<String>>>,
        formatter: FormatterConfig,
    }

    impl Handler for Capture {
        fn publish(&mut self, record: &LogRecord) -> Result<()> {
            self.lines
                .lock()
                .push(format!("{} {}", record.level, record.message));
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "capture"
        }
        fn formatter(&self) -> &FormatterConfig {
            &self.formatter
        }
        fn formatter_mut(&mut self) -> &mut FormatterConfig {
            &mut self.formatter
        }
    }

    fn capture() -> (SharedHandler, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let handler = SharedHandler::new(Capture {
            lines: Arc::clone(&lines),
            formatter: FormatterConfig::default(),
        });
        (handler, lines)
    }

    #[test]
    fn test_level_filtering() {
        let logger = get_logger("logger_unit.filter");
        logger.set_use_parent_handlers(false);
        logger.set_level(Level::Warning);
        let (handler, lines) = capture();
        logger.add_handler(handler);

        logger.info("dropped").unwrap();
        logger.warning("kept").unwrap();
        logger.fatal("kept too").unwrap();

        assert_eq!(*lines.lock(), vec!["WARNING kept", "FATAL kept too"]);
    }

    #[test]
    fn test_level_inherited_from_ancestor() {
        let parent = get_logger("logger_unit.inherit");
        parent.set_level(Level::Debug);
        let child = get_logger("logger_unit.inherit.deep.child");

        assert_eq!(child.level(), None);
        assert_eq!(child.effective_level(), Level::Debug);
        assert!(child.is_loggable(Level::Debug));
        assert!(!child.is_loggable(Level::Trace));
    }

    #[test]
    fn test_parent_handlers_walk() {
        let parent = get_logger("logger_unit.walk");
        parent.set_use_parent_handlers(false);
        parent.set_level(Level::Trace);
        let (parent_handler, parent_lines) = capture();
        parent.add_handler(parent_handler);

        let child = get_logger("logger_unit.walk.child");
        let (child_handler, child_lines) = capture();
        child.add_handler(child_handler);

        child.debug("both").unwrap();
        assert_eq!(child_lines.lock().len(), 1);
        assert_eq!(parent_lines.lock().len(), 1);

        child.set_use_parent_handlers(false);
        child.debug("child only").unwrap();
        assert_eq!(child_lines.lock().len(), 2);
        assert_eq!(parent_lines.lock().len(), 1);
    }

    #[test]
    fn test_remove_handler_by_identity() {
        let logger = get_logger("logger_unit.remove");
        let (first, _) = capture();
        let (second, _) = capture();
        logger.add_handler(first.clone());
        logger.add_handler(second.clone());

        assert!(logger.remove_handler(&first));
        assert!(!logger.remove_handler(&first));
        assert_eq!(logger.handlers(), vec![second]);
    }

    #[test]
    fn test_failing_handler_does_not_block_others() {
        struct Failing(FormatterConfig);
        impl Handler for Failing {
            fn publish(&mut self, _: &LogRecord) -> Result<()> {
                Err(LoggerError::handler_io(
                    "failing",
                    "writing record",
                    std::io::Error::new(std::io::ErrorKind::Other, "boom"),
                ))
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "failing"
            }
            fn formatter(&self) -> &FormatterConfig {
                &self.0
            }
            fn formatter_mut(&mut self) -> &mut FormatterConfig {
                &mut self.0
            }
        }

        let logger = get_logger("logger_unit.failing");
        logger.set_use_parent_handlers(false);
        logger.add_handler(SharedHandler::new(Failing(FormatterConfig::default())));
        let (handler, lines) = capture();
        logger.add_handler(handler);

        let err = logger.error("still delivered").unwrap_err();
        assert!(err.is_handler_io());
        assert_eq!(*lines.lock(), vec!["ERROR still delivered"]);

        // the logger stays usable
        assert!(logger.error("again").is_err());
        assert_eq!(lines.lock().len(), 2);
    }
}
