//! Shared test helpers

use logging_facade::{FormatterConfig, Handler, LogRecord, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every formatted line in memory
pub struct CaptureHandler {
    lines: Arc<Mutex<Vec<String>>>,
    formatter: FormatterConfig,
}

impl CaptureHandler {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let handler = Self {
            lines: Arc::clone(&lines),
            formatter: FormatterConfig::new().with_utc(true),
        };
        (handler, lines)
    }
}

impl Handler for CaptureHandler {
    fn publish(&mut self, record: &LogRecord) -> Result<()> {
        self.lines.lock().push(self.formatter.format(record));
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
