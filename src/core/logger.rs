//! Pluggable log sinks for client components
//!
//! A client reports lifecycle decisions (duplicate `init`, dropped pushes,
//! failed scripts) through a [`Logger`]. The default sink discards
//! everything; [`LogFacade`] routes into the `log` crate.

use std::cell::RefCell;

pub trait Logger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {}

/// Forwards to the `log` crate under the `gtmkit` target
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn debug(&self, message: &str) {
        log::debug!(target: "gtmkit", "{}", message);
    }

    fn info(&self, message: &str) {
        log::info!(target: "gtmkit", "{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!(target: "gtmkit", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "gtmkit", "{}", message);
    }
}

/// Keeps every message in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: RefCell<Vec<(log::Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(log::Level, String)> {
        self.records.borrow().clone()
    }

    /// Messages logged at exactly `level`
    pub fn messages(&self, level: log::Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(record_level, _)| *record_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }

    fn record(&self, level: log::Level, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.record(log::Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(log::Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(log::Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(log::Level::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_records_by_level() {
        let logger = MemoryLogger::new();
        logger.debug("one");
        logger.warn("two");
        logger.warn("three");

        assert_eq!(logger.messages(log::Level::Warn), vec!["two", "three"]);
        assert_eq!(logger.messages(log::Level::Debug), vec!["one"]);
        assert_eq!(logger.records().len(), 3);

        logger.clear();
        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_noop_and_facade_accept_messages() {
        let sinks: [&dyn Logger; 2] = [&NoopLogger, &LogFacade];
        for sink in sinks {
            sink.debug("d");
            sink.info("i");
            sink.warn("w");
            sink.error("e");
        }
    }
}
