//! Injectable diagnostics sink.
//!
//! Components never reach for a global logger directly. They are handed a
//! [`Journal`] at construction and record warnings and errors through it,
//! tagged with their component name. The binary wires in [`LogJournal`],
//! which forwards to the `log` facade; tests use [`MemoryJournal`] to assert
//! on what was recorded.

use log::Level;
use std::cell::RefCell;
use std::fmt;

/// A sink for diagnostic records.
///
/// Recording must never fail or panic: the journal is purely observational.
pub trait Journal: fmt::Debug {
    /// Record a message at `level` on behalf of `component`.
    fn record(&self, level: Level, component: &'static str, message: &str);

    fn error(&self, component: &'static str, message: &str) {
        self.record(Level::Error, component, message);
    }

    fn warn(&self, component: &'static str, message: &str) {
        self.record(Level::Warn, component, message);
    }

    fn info(&self, component: &'static str, message: &str) {
        self.record(Level::Info, component, message);
    }

    fn debug(&self, component: &'static str, message: &str) {
        self.record(Level::Debug, component, message);
    }
}

/// Forwards every record to the process-wide `log` facade, using the
/// component name as the log target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogJournal;

impl Journal for LogJournal {
    fn record(&self, level: Level, component: &'static str, message: &str) {
        log::log!(target: component, level, "{}", message);
    }
}

/// A single captured record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub level: Level,
    pub component: &'static str,
    pub message: String,
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: RefCell<Vec<Entry>>,
}

impl MemoryJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    /// Number of records at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .count()
    }

    /// Whether any record at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }
}

impl Journal for MemoryJournal {
    fn record(&self, level: Level, component: &'static str, message: &str) {
        self.entries.borrow_mut().push(Entry {
            level,
            component,
            message: message.to_string(),
        });
    }
}
