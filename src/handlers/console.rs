//! Console handler: one formatted line per record on standard error

use crate::core::{FormatterConfig, Handler, LogRecord, LoggerError, Result};
use std::io::Write;

pub struct ConsoleHandler {
    formatter: FormatterConfig,
    use_colors: bool,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            formatter: FormatterConfig::default(),
            use_colors: false,
        }
    }

    /// Colour the level column (requires the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    fn format_line(&self, record: &LogRecord) -> String {
        if self.use_colors {
            if let Some(line) = self.colored_line(record) {
                return line;
            }
        }
        self.formatter.format(record)
    }

    #[cfg(feature = "console")]
    fn colored_line(&self, record: &LogRecord) -> Option<String> {
        use colored::Colorize;
        let level = format!("{:<8}", record.level)
            .color(record.level.color_code())
            .to_string();
        Some(self.formatter.format_with_level(record, &level))
    }

    #[cfg(not(feature = "console"))]
    fn colored_line(&self, _record: &LogRecord) -> Option<String> {
        None
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn publish(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format_line(record);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line)
            .map_err(|e| LoggerError::handler_io("console", "writing record", e))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr()
            .flush()
            .map_err(|e| LoggerError::handler_io("console", "flushing", e))
    }

    fn name(&self) -> &str {
        "console"
    }

    fn formatter(&self) -> &FormatterConfig {
        &self.formatter
    }

    fn formatter_mut(&mut self) -> &mut FormatterConfig {
        &mut self.formatter
    }
}
