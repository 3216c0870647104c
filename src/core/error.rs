//! Error types for the logging facade

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name not in the fixed level set
    #[error("Unknown log level: '{name}'")]
    UnknownLevel { name: String },

    /// Rejected configuration block
    #[error("Invalid logging configuration: {message}")]
    InvalidConfig { message: String },

    /// Console or file write failure
    #[error("I/O error in {handler} handler while {operation}: {source}")]
    HandlerIo {
        handler: String,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// File rotation failure; the previous file stays open
    #[error("File rotation failed for '{path}': {message}")]
    Rotation {
        path: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON configuration text could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        LoggerError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a handler I/O error with the failing operation
    pub fn handler_io(
        handler: impl Into<String>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::HandlerIo {
            handler: handler.into(),
            operation: operation.into(),
            source,
        }
    }

    pub fn rotation(path: &Path, message: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Rotation {
            path: path.display().to_string(),
            message: message.into(),
            source,
        }
    }

    /// True for console/file write failures, rotation included.
    pub fn is_handler_io(&self) -> bool {
        matches!(self, LoggerError::HandlerIo { .. } | LoggerError::Rotation { .. })
    }
}
