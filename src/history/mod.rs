//! Calculation history.
//!
//! Keeps the most recent calculations, newest first, and converts them to
//! and from the single string stored under [`HISTORY_KEY`].

mod entry;

use std::collections::VecDeque;

pub use entry::HistoryEntry;

/// Maximum number of kept entries.
pub const HISTORY_CAPACITY: usize = 20;
/// Separator between entries in the serialized form.
pub const HISTORY_DELIMITER: &str = "###";
/// Store key of the serialized history.
pub const HISTORY_KEY: &str = "history_key";

/// Bounded, newest-first log of calculations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the front, dropping the oldest one past capacity.
    pub fn record(&mut self, entry: impl Into<HistoryEntry>) {
        self.entries.push_front(entry.into());
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entries as strings, newest first.
    pub fn list(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Get the entry at `index`, 0 being the newest.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the content with a serialized history.
    ///
    /// An empty string gives an empty ledger. Entries beyond capacity are
    /// dropped from the old end.
    pub fn load(&mut self, serialized: &str) {
        self.entries.clear();
        if serialized.is_empty() {
            return;
        }

        self.entries.extend(
            serialized
                .split(HISTORY_DELIMITER)
                .take(HISTORY_CAPACITY)
                .map(HistoryEntry::from),
        );
    }

    /// Join the entries, newest first.
    ///
    /// An entry that itself contains the delimiter does not survive a
    /// round-trip.
    pub fn serialize(&self) -> String {
        self.list().join(HISTORY_DELIMITER)
    }

    pub fn from_serialized(serialized: &str) -> Self {
        let mut ledger = Self::new();
        ledger.load(serialized);
        ledger
    }
}
