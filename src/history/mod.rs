//! Past reconciliation runs.
//!
//! Every run can be filed into a history list keyed by timestamp, input file
//! names and category. The list is loaded once through a [`HistoryStore`] and
//! written back through it after every change.
//!
//! - [`MemoryHistoryStore`]: process-lifetime storage, used by the web server
//! - [`JsonFileHistoryStore`]: a single JSON file, used by the CLI
//!
//! ## Example
//!
//! ```rust
//! use recon_desk::history::{History, MemoryHistoryStore};
//! use recon_desk::core::Category;
//! use recon_desk::matching::reconcile;
//!
//! let mut history = History::open(Box::new(MemoryHistoryStore::new())).unwrap();
//! let result = reconcile("ORIGIN,SYS_CODE\nA,K1\n", "SYS_CODE\nK1\n");
//! let id = history.record("it.csv", "master.csv", Category::Tarif, result).unwrap();
//! assert!(history.get(id).is_some());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::result::ReconciliationResult;
use crate::core::types::Category;

pub mod store;

pub use store::{
    HistoryData, HistoryError, HistoryStore, JsonFileHistoryStore, MemoryHistoryStore,
};

/// One stored reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub it_file_name: String,
    pub master_file_name: String,
    pub category: Category,
    pub result: ReconciliationResult,
}

/// One line of the history list, without the full report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub it_file_name: String,
    pub master_file_name: String,
    pub category: Category,
    pub total_rows: usize,
    pub matches: usize,
    pub mismatches: usize,
}

impl From<&HistoryEntry> for HistorySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: entry.timestamp,
            it_file_name: entry.it_file_name.clone(),
            master_file_name: entry.master_file_name.clone(),
            category: entry.category,
            total_rows: entry.result.total_rows,
            matches: entry.result.matches,
            mismatches: entry.result.mismatches.len(),
        }
    }
}

/// History list backed by an injected store
pub struct History {
    store: Box<dyn HistoryStore>,
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl History {
    /// Load the current list from `store`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be read.
    pub fn open(store: Box<dyn HistoryStore>) -> Result<Self, HistoryError> {
        let data = store.load()?;
        let after_newest = data.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let next_id = data.next_id.max(after_newest);
        tracing::debug!("loaded {} history entries", data.entries.len());
        Ok(Self {
            store,
            entries: data.entries,
            next_id,
        })
    }

    /// File a finished run as the newest entry and persist the list.
    ///
    /// Ids increase monotonically; an id freed by `remove` or `clear` is never
    /// handed out again.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be written. The in-memory list
    /// is left unchanged in that case.
    pub fn record(
        &mut self,
        it_file_name: &str,
        master_file_name: &str,
        category: Category,
        result: ReconciliationResult,
    ) -> Result<u64, HistoryError> {
        let id = self.next_id;
        let entry = HistoryEntry {
            id,
            timestamp: Utc::now(),
            it_file_name: it_file_name.to_string(),
            master_file_name: master_file_name.to_string(),
            category,
            result,
        };

        let mut updated = Vec::with_capacity(self.entries.len() + 1);
        updated.push(entry);
        updated.extend(self.entries.iter().cloned());
        self.persist(id + 1, updated)?;

        Ok(id)
    }

    /// Entries, newest first
    #[must_use]
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.entries.iter().map(HistorySummary::from).collect()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Remove one entry; returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be written.
    pub fn remove(&mut self, id: u64) -> Result<bool, HistoryError> {
        let before = self.entries.len();
        let updated: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        if updated.len() == before {
            return Ok(false);
        }
        self.persist(self.next_id, updated)?;
        Ok(true)
    }

    /// Drop every entry.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.persist(self.next_id, Vec::new())
    }

    fn persist(&mut self, next_id: u64, entries: Vec<HistoryEntry>) -> Result<(), HistoryError> {
        let data = HistoryData::new(next_id, entries);
        self.store.save(&data)?;
        self.next_id = data.next_id;
        self.entries = data.entries;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::reconcile;

    fn sample_result(tarif: &str) -> ReconciliationResult {
        reconcile(
            &format!("ORIGIN,SYS_CODE,SERVICE,TARIF\nA,K1,REG23,{tarif}\n"),
            "SYS_CODE,Service REG,Tarif REG\nK1,REG23,100\n",
        )
    }

    #[test]
    fn test_record_prepends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::open(Box::new(JsonFileHistoryStore::new(&path))).unwrap();
        let first = history
            .record("a.csv", "m.csv", Category::Tarif, sample_result("100"))
            .unwrap();
        let second = history
            .record("b.csv", "m.csv", Category::Biaya, sample_result("999"))
            .unwrap();

        assert_eq!(history.list()[0].id, second);
        assert_eq!(history.list()[1].id, first);

        let reopened = History::open(Box::new(JsonFileHistoryStore::new(&path))).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get(first).unwrap().result.matches, 1);
        assert_eq!(reopened.get(second).unwrap().category, Category::Biaya);
    }

    #[test]
    fn test_stored_results_are_not_mutated() {
        let mut history = History::open(Box::new(MemoryHistoryStore::new())).unwrap();
        let result = sample_result("100");
        let id = history
            .record("a.csv", "m.csv", Category::Tarif, result.clone())
            .unwrap();
        history
            .record("a.csv", "m.csv", Category::Tarif, sample_result("5"))
            .unwrap();
        assert_eq!(history.get(id).unwrap().result, result);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut history = History::open(Box::new(MemoryHistoryStore::new())).unwrap();
        let id = history
            .record("a.csv", "m.csv", Category::Tarif, sample_result("1"))
            .unwrap();
        history
            .record("b.csv", "m.csv", Category::Tarif, sample_result("2"))
            .unwrap();

        let summaries = history.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].id, id);
        assert_eq!(summaries[1].total_rows, 1);

        assert!(history.remove(id).unwrap());
        assert!(!history.remove(id).unwrap());
        assert_eq!(history.len(), 1);

        history.clear().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut history = History::open(Box::new(MemoryHistoryStore::new())).unwrap();
        history
            .record("a.csv", "m.csv", Category::Tarif, sample_result("1"))
            .unwrap();
        let second = history
            .record("b.csv", "m.csv", Category::Tarif, sample_result("2"))
            .unwrap();

        assert!(history.remove(second).unwrap());
        let third = history
            .record("c.csv", "m.csv", Category::Tarif, sample_result("3"))
            .unwrap();
        assert_ne!(third, second);
        assert!(history.get(second).is_none());
        assert_eq!(history.get(third).unwrap().it_file_name, "c.csv");
    }

    #[test]
    fn test_id_counter_survives_reopen_after_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::open(Box::new(JsonFileHistoryStore::new(&path))).unwrap();
        let first = history
            .record("a.csv", "m.csv", Category::Tarif, sample_result("1"))
            .unwrap();
        history.clear().unwrap();

        let mut reopened = History::open(Box::new(JsonFileHistoryStore::new(&path))).unwrap();
        assert!(reopened.is_empty());
        let next = reopened
            .record("b.csv", "m.csv", Category::Tarif, sample_result("2"))
            .unwrap();
        assert!(next > first);
    }
}
