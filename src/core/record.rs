//! Log record structure

use super::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// An error attached to a record: its message plus the `source()` chain.
///
/// Each cause in the chain counts as one frame when stack traces are truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub causes: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            causes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger_name: String,
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl LogRecord {
    /// Escape line breaks and tabs so one record always renders as one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, logger_name: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            logger_name: logger_name.into(),
            thread_name: std::thread::current().name().map(String::from),
            error: None,
        }
    }

    pub fn with_error(mut self, err: &(dyn Error + 'static)) -> Self {
        let mut report = ErrorReport::from_error(err);
        report.message = Self::sanitize_message(&report.message);
        for cause in &mut report.causes {
            *cause = Self::sanitize_message(cause);
        }
        self.error = Some(report);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        msg: &'static str,
        inner: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl Error for Layer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.inner.as_deref().map(|e| e as &(dyn Error + 'static))
        }
    }

    #[test]
    fn test_message_sanitized() {
        let record = LogRecord::new(Level::Info, "app", "line one\nERROR fake\tentry");
        assert_eq!(record.message, "line one\\nERROR fake\\tentry");
    }

    #[test]
    fn test_error_chain_captured() {
        let err = Layer {
            msg: "request failed",
            inner: Some(Box::new(Layer {
                msg: "connection reset",
                inner: Some(Box::new(Layer {
                    msg: "broken pipe",
                    inner: None,
                })),
            })),
        };
        let record = LogRecord::new(Level::Error, "net", "oops").with_error(&err);
        let report = record.error.unwrap();
        assert_eq!(report.message, "request failed");
        assert_eq!(report.causes, vec!["connection reset", "broken pipe"]);
    }
}
