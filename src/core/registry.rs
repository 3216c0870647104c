//! Process-wide logger cache
//!
//! One [`Logger`] per name, created on first lookup and kept for the life of
//! the process. The root logger (`""`) starts out at `INFO` with a single
//! console handler, the same baseline [`clear_all_handlers`] restores.

use super::{handler::SharedHandler, level::Level, logger::Logger};
use crate::handlers::ConsoleHandler;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the root logger
pub const ROOT_LOGGER_NAME: &str = "";

static LOGGERS: Lazy<RwLock<HashMap<String, Arc<Logger>>>> = Lazy::new(|| {
    let root = Arc::new(Logger::new(ROOT_LOGGER_NAME));
    install_root_baseline(&root);
    let mut loggers = HashMap::new();
    loggers.insert(ROOT_LOGGER_NAME.to_string(), root);
    RwLock::new(loggers)
});

fn install_root_baseline(root: &Logger) {
    root.replace_state(
        Some(Level::Info),
        vec![SharedHandler::new(ConsoleHandler::new())],
        true,
    );
}

/// Return the logger for `name`, creating it on first use.
///
/// # Examples
///
/// ```
/// use logging_facade::get_logger;
/// use std::sync::Arc;
///
/// let a = get_logger("app.db");
/// let b = get_logger("app.db");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub fn get_logger(name: &str) -> Arc<Logger> {
    if let Some(logger) = LOGGERS.read().get(name) {
        return Arc::clone(logger);
    }
    let mut loggers = LOGGERS.write();
    Arc::clone(
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name))),
    )
}

pub fn root_logger() -> Arc<Logger> {
    get_logger(ROOT_LOGGER_NAME)
}

/// Logger name for a Rust module path: `my_app::db::pool` becomes `my_app.db.pool`
pub fn logger_name_for_module(module_path: &str) -> String {
    module_path.replace("::", ".")
}

/// Names of every cached logger, sorted
pub fn logger_names() -> Vec<String> {
    let mut names: Vec<String> = LOGGERS.read().keys().cloned().collect();
    names.sort();
    names
}

pub(crate) fn find_parent(name: &str) -> Option<Arc<Logger>> {
    if name.is_empty() {
        return None;
    }
    let loggers = LOGGERS.read();
    let mut prefix = name;
    while let Some(idx) = prefix.rfind('.') {
        prefix = &prefix[..idx];
        if let Some(logger) = loggers.get(prefix) {
            return Some(Arc::clone(logger));
        }
    }
    loggers.get(ROOT_LOGGER_NAME).cloned()
}

/// Reset every cached logger to the baseline.
///
/// All handlers are detached, every logger's own level is cleared so it
/// inherits, parent delegation is switched back on, and the root logger gets
/// level `INFO` plus one fresh console handler.
pub fn clear_all_handlers() {
    let loggers: Vec<Arc<Logger>> = LOGGERS.read().values().cloned().collect();
    for logger in loggers {
        if logger.is_root() {
            install_root_baseline(&logger);
        } else {
            logger.replace_state(None, Vec::new(), true);
        }
    }
}
