//! A calculator session: calculations, history and preferences over a store.

use anyhow::Result;
use tracing::warn;

use crate::calculator::{CalcResult, calculate};
use crate::history::{HISTORY_KEY, HistoryEntry, HistoryLedger};
use crate::preferences::Preferences;
use crate::store::KeyValueStore;

/// Calculator state backed by a [`KeyValueStore`].
pub struct Calculator<S: KeyValueStore> {
    store: S,
    history: HistoryLedger,
    preferences: Preferences,
}

impl<S: KeyValueStore> Calculator<S> {
    /// Create a session, restoring history and preferences from `store`.
    pub fn new(store: S) -> Self {
        let history = store
            .get_string(HISTORY_KEY)
            .map(|serialized| HistoryLedger::from_serialized(&serialized))
            .unwrap_or_default();
        let preferences = Preferences::load(&store);

        Self {
            store,
            history,
            preferences,
        }
    }

    /// Calculate raw input, recording and persisting successful results.
    ///
    /// Returns `None` when the input is empty.
    pub fn submit(&mut self, raw: &str) -> Option<CalcResult> {
        let result = calculate(raw)?;

        if let Some(entry) = HistoryEntry::from_calc_result(&result) {
            self.history.record(entry);
            self.persist_history();
        }

        Some(result)
    }

    /// Input text of the history entry at `index`, 0 being the newest.
    pub fn recall(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(HistoryEntry::recalled_input)
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Remove all history, in memory and in the store.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Change and persist the preferences.
    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<()> {
        self.preferences = preferences;
        preferences.save(&mut self.store);
        self.store.commit()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_history(&mut self) {
        self.store.put_string(HISTORY_KEY, self.history.serialize());

        // Losing history must not fail the calculation itself.
        if let Err(err) = self.store.commit() {
            warn!("Failed to save history: {:#}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalcFailure;
    use crate::store::MemoryStore;

    #[test]
    fn test_submit_records_success() {
        let mut calc = Calculator::new(MemoryStore::new());

        let result = calc.submit("2+2").unwrap();
        assert_eq!(result.display(), "= 4");
        assert_eq!(calc.history().list(), vec!["2+2 = 4"]);
        assert_eq!(
            calc.store().get_string(HISTORY_KEY).as_deref(),
            Some("2+2 = 4")
        );
    }

    #[test]
    fn test_submit_skips_failures() {
        let mut calc = Calculator::new(MemoryStore::new());

        let result = calc.submit("1/0").unwrap();
        assert_eq!(result.failure(), Some(CalcFailure::Error));
        assert!(calc.history().is_empty());
        assert_eq!(calc.store().get_string(HISTORY_KEY), None);
    }

    #[test]
    fn test_empty_input_is_ignored() {
        let mut calc = Calculator::new(MemoryStore::new());
        assert!(calc.submit("   ").is_none());
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_usable_after_failure() {
        let mut calc = Calculator::new(MemoryStore::new());
        calc.submit("x=1=2");
        calc.submit("(((");

        let result = calc.submit("2x+4=10").unwrap();
        assert_eq!(result.display(), "x = 3");
        assert_eq!(calc.recall(0), Some("2*x+4=10"));
    }

    #[test]
    fn test_history_survives_restart() {
        let mut calc = Calculator::new(MemoryStore::new());
        calc.submit("1+1");
        calc.submit("3*3");

        let restored = Calculator::new(calc.into_store());
        assert_eq!(restored.history().list(), vec!["3*3 = 9", "1+1 = 2"]);
        assert_eq!(restored.recall(1), Some("1+1"));
    }

    #[test]
    fn test_preferences() {
        let mut calc = Calculator::new(MemoryStore::new());
        assert_eq!(calc.preferences(), Preferences::default());

        let prefs = Preferences {
            show_keypad: true,
            outline_keys: false,
        };
        calc.set_preferences(prefs).unwrap();

        let restored = Calculator::new(calc.into_store());
        assert_eq!(restored.preferences(), prefs);
    }

    #[test]
    fn test_clear_history() {
        let mut calc = Calculator::new(MemoryStore::new());
        calc.submit("1+1");
        calc.clear_history();

        assert!(calc.history().is_empty());
        assert_eq!(calc.store().get_string(HISTORY_KEY).as_deref(), Some(""));
    }
}
