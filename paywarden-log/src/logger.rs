//! Injectable logging sinks
//!
//! Services take an `Arc<dyn Logger>` rather than writing to a global sink,
//! so tests can assert on exactly what was logged.

use crate::{Fields, Format, Level, LogConfig, format_entry};
use parking_lot::Mutex;
use std::sync::Arc;

/// Leveled structured logging sink.
pub trait Logger: Send + Sync {
    /// Emit an entry. Implementations decide whether `level` passes their filter.
    fn log(&self, level: Level, message: &str, fields: &Fields);

    fn debug(&self, message: &str, fields: &Fields) {
        self.log(Level::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: &Fields) {
        self.log(Level::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: &Fields) {
        self.log(Level::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: &Fields) {
        self.log(Level::Error, message, fields);
    }
}

/// Writes entries to stderr using the configured [`Format`].
#[derive(Debug, Clone)]
pub struct StderrLogger {
    config: LogConfig,
    target: String,
}

impl StderrLogger {
    /// Logger at `level`, other settings taken from the environment.
    pub fn new(level: Level) -> Self {
        Self::with_config(LogConfig::from_env().with_level(level))
    }

    /// Logger with an explicit configuration
    pub fn with_config(config: LogConfig) -> Self {
        Self {
            config,
            target: "paywarden".to_string(),
        }
    }

    /// Set the target reported with every entry
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    pub fn level(&self) -> Level {
        self.config.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Off && level >= self.config.level
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::with_config(LogConfig::from_env())
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Level, message: &str, fields: &Fields) {
        if !self.enabled(level) {
            return;
        }
        eprintln!(
            "{}",
            format_entry(&self.config, level, &self.target, message, fields)
        );
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub fields: Fields,
}

/// Keeps every entry in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the code
/// under test and inspect the other.
///
/// ```
/// use paywarden_log::{Fields, Level, Logger, MemoryLogger};
///
/// let logger = MemoryLogger::new();
/// logger.info("payment processed", &Fields::new().with("transactionId", "tx_1"));
///
/// let records = logger.records_at(Level::Info);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].fields.get_str("transactionId"), Some("tx_1"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryLogger {
    min_level: Level,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLogger {
    /// Record everything
    pub fn new() -> Self {
        Self::with_level(Level::Trace)
    }

    /// Record entries at or above `level`
    pub fn with_level(level: Level) -> Self {
        Self {
            min_level: level,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All captured entries, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Captured entries at exactly `level`
    pub fn records_at(&self, level: Level) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    /// First entry with the given level and message
    pub fn find(&self, level: Level, message: &str) -> Option<LogRecord> {
        self.records
            .lock()
            .iter()
            .find(|r| r.level == level && r.message == message)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str, fields: &Fields) {
        if level == Level::Off || level < self.min_level {
            return;
        }
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
            fields: fields.clone(),
        });
    }
}
