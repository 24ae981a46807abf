//! Recording logger

use parking_lot::Mutex;

use super::traits::{LogLevel, Logger};

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// A logger that keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages logged at `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Whether any message at any level contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|r| r.message.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
