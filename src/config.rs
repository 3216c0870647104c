//! Declarative logger configuration
//!
//! A configuration block is a JSON object with a fixed set of keys:
//!
//! | key | type | default |
//! |---|---|---|
//! | `node` | string, logger name | `""` (root) |
//! | `console` | bool | `false` |
//! | `filename` | string | none |
//! | `roll` | `never`, `hourly`, `daily`, `sunday` .. `saturday` | `never` |
//! | `utc` | bool | `false` |
//! | `truncate` | int, 0 = unlimited | `0` |
//! | `truncate_stack_traces` | int, 0 = unlimited | `30` |
//! | `level` | level name | `warning` |
//! | `use_parents` | bool | `true` |
//!
//! Everything is parsed and validated before the target logger is touched,
//! so a rejected block leaves the previous configuration in place.
//!
//! # Examples
//!
//! ```
//! use logging_facade::{configure, Level};
//! use serde_json::json;
//!
//! let logger = configure(&json!({"node": "doc.app", "level": "debug"}), false, false).unwrap();
//! assert_eq!(logger.level(), Some(Level::Debug));
//!
//! let err = configure(&json!({"bogus": 1}), false, false).unwrap_err();
//! assert!(err.to_string().contains("bogus"));
//! ```

use crate::core::{
    get_logger, FormatterConfig, Level, Logger, LoggerError, Result, SharedHandler,
    DEFAULT_TRUNCATE_STACK_TRACES,
};
use crate::handlers::{ConsoleHandler, FileHandler, RollPolicy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Keys a configuration block may carry
pub const ALLOWED_KEYS: [&str; 9] = [
    "node",
    "console",
    "filename",
    "roll",
    "utc",
    "truncate",
    "truncate_stack_traces",
    "level",
    "use_parents",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub node: String,
    pub console: bool,
    pub filename: Option<PathBuf>,
    pub roll: String,
    pub utc: bool,
    pub truncate: usize,
    pub truncate_stack_traces: usize,
    pub level: String,
    pub use_parents: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            node: String::new(),
            console: false,
            filename: None,
            roll: RollPolicy::Never.to_string(),
            utc: false,
            truncate: 0,
            truncate_stack_traces: DEFAULT_TRUNCATE_STACK_TRACES,
            level: "warning".to_string(),
            use_parents: true,
        }
    }
}

/// A validated block, ready to commit
struct Prepared {
    node: String,
    level: Level,
    handlers: Vec<SharedHandler>,
    use_parents: bool,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = node.into();
        self
    }

    #[must_use]
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    #[must_use]
    pub fn with_file(mut self, filename: impl Into<PathBuf>, roll: RollPolicy) -> Self {
        self.filename = Some(filename.into());
        self.roll = roll.to_string();
        self
    }

    #[must_use]
    pub fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    #[must_use]
    pub fn with_truncate(mut self, chars: usize) -> Self {
        self.truncate = chars;
        self
    }

    #[must_use]
    pub fn with_truncate_stack_traces(mut self, frames: usize) -> Self {
        self.truncate_stack_traces = frames;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level.name().to_lowercase();
        self
    }

    #[must_use]
    pub fn with_use_parents(mut self, use_parents: bool) -> Self {
        self.use_parents = use_parents;
        self
    }

    /// Parse a configuration block, rejecting keys outside [`ALLOWED_KEYS`].
    ///
    /// With `allow_nested_blocks`, object-valued keys outside the allow-list
    /// are skipped instead of rejected.
    pub fn from_block(block: &Value, allow_nested_blocks: bool) -> Result<Self> {
        let map = block.as_object().ok_or_else(|| {
            LoggerError::invalid_config("configuration block must be a JSON object")
        })?;

        let mut invalid = Vec::new();
        let mut recognized = Map::new();
        for (key, value) in map {
            if ALLOWED_KEYS.contains(&key.as_str()) {
                recognized.insert(key.clone(), value.clone());
            } else if !(allow_nested_blocks && value.is_object()) {
                invalid.push(key.as_str());
            }
        }
        if !invalid.is_empty() {
            invalid.sort_unstable();
            return Err(LoggerError::invalid_config(format!(
                "unknown keys: {}",
                invalid.join(", ")
            )));
        }

        serde_json::from_value(Value::Object(recognized))
            .map_err(|e| LoggerError::invalid_config(e.to_string()))
    }

    fn prepare(&self) -> Result<Prepared> {
        let level = Level::lookup(&self.level).map_err(|_| {
            LoggerError::invalid_config(format!("unknown level '{}'", self.level))
        })?;

        let formatter = FormatterConfig::new()
            .with_utc(self.utc)
            .with_truncate_message_at(self.truncate)
            .with_truncate_stack_trace_at(self.truncate_stack_traces);

        let mut handlers = Vec::new();
        if self.console {
            handlers.push(SharedHandler::new(
                ConsoleHandler::new().with_formatter(formatter.clone()),
            ));
        }
        if let Some(ref filename) = self.filename {
            let roll: RollPolicy = self.roll.parse()?;
            handlers.push(SharedHandler::new(
                FileHandler::new(filename, roll).with_formatter(formatter),
            ));
        }

        Ok(Prepared {
            node: self.node.clone(),
            level,
            handlers,
            use_parents: self.use_parents,
        })
    }

    /// Validate, then unless `validate_only`, install on the target logger.
    pub fn apply(&self, validate_only: bool) -> Result<Arc<Logger>> {
        let prepared = self.prepare()?;
        Ok(commit(prepared, validate_only))
    }
}

fn commit(prepared: Prepared, validate_only: bool) -> Arc<Logger> {
    let logger = get_logger(&prepared.node);
    if !validate_only {
        logger.replace_state(
            Some(prepared.level),
            prepared.handlers,
            prepared.use_parents,
        );
    }
    logger
}

/// Configure one logger from a block.
///
/// `validate_only` runs every check but changes nothing on the logger. The
/// target is still resolved through [`get_logger`], so a first validate-only
/// call for a node adds it to the cache like any other lookup.
pub fn configure(
    block: &Value,
    validate_only: bool,
    allow_nested_blocks: bool,
) -> Result<Arc<Logger>> {
    LoggerConfig::from_block(block, allow_nested_blocks)?.apply(validate_only)
}

/// Configure several loggers; if any block is invalid none are applied.
pub fn configure_many(blocks: &[Value], allow_nested_blocks: bool) -> Result<Vec<Arc<Logger>>> {
    let prepared = blocks
        .iter()
        .map(|block| LoggerConfig::from_block(block, allow_nested_blocks)?.prepare())
        .collect::<Result<Vec<_>>>()?;
    Ok(prepared
        .into_iter()
        .map(|p| commit(p, false))
        .collect())
}

/// Configure from JSON text holding one block or an array of blocks
pub fn configure_json(
    text: &str,
    validate_only: bool,
    allow_nested_blocks: bool,
) -> Result<Vec<Arc<Logger>>> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(blocks) if validate_only => blocks
            .iter()
            .map(|block| configure(block, true, allow_nested_blocks))
            .collect(),
        Value::Array(blocks) => configure_many(&blocks, allow_nested_blocks),
        block => Ok(vec![configure(&block, validate_only, allow_nested_blocks)?]),
    }
}
