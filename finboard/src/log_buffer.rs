use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tracing::Level;

pub const DEFAULT_CAPACITY: usize = 5000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Thread-safe circular buffer backing the in-app log screen
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries: max_entries.max(1),
        }
    }

    pub fn push(&self, entry: LogEntry) {
        // A poisoned lock only means a writer panicked mid-push; the data is still usable
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.read().iter().cloned().collect()
    }

    /// The `height` entries visible when scrolled `offset` lines up from the
    /// newest entry, oldest first. Also returns the index of the first one.
    pub fn window(&self, offset: usize, height: usize) -> (usize, Vec<LogEntry>) {
        let entries = self.read();
        let total = entries.len();
        let end = total.saturating_sub(offset);
        let start = end.saturating_sub(height);
        (start, entries.range(start..end).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, VecDeque<LogEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
