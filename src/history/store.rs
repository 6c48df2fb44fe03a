use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::history::HistoryEntry;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to access history: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse history: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("History store lock poisoned")]
    Poisoned,
}

/// History file version for compatibility checking
pub const HISTORY_VERSION: &str = "1.0.0";

/// Serializable history file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    pub version: String,
    /// Id the next recorded run receives; never reused after removal
    #[serde(default)]
    pub next_id: u64,
    pub entries: Vec<HistoryEntry>,
}

impl HistoryData {
    #[must_use]
    pub fn new(next_id: u64, entries: Vec<HistoryEntry>) -> Self {
        Self {
            version: HISTORY_VERSION.to_string(),
            next_id,
            entries,
        }
    }
}

impl Default for HistoryData {
    fn default() -> Self {
        Self::new(1, Vec::new())
    }
}

/// Where the history list is loaded from and rewritten to
pub trait HistoryStore: Send + Sync {
    /// Load the id counter and every stored entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the backing storage cannot be read or parsed.
    fn load(&self) -> Result<HistoryData, HistoryError>;

    /// Replace the stored history with `data`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the backing storage cannot be written.
    fn save(&self, data: &HistoryData) -> Result<(), HistoryError>;
}

/// Keeps history for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    data: Mutex<HistoryData>,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<HistoryData, HistoryError> {
        let data = self.data.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(data.clone())
    }

    fn save(&self, data: &HistoryData) -> Result<(), HistoryError> {
        let mut stored = self.data.lock().map_err(|_| HistoryError::Poisoned)?;
        stored.clone_from(data);
        Ok(())
    }
}

/// Stores history as a single JSON document, rewritten on every save
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse history from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Parse` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<HistoryData, HistoryError> {
        let data: HistoryData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != HISTORY_VERSION {
            tracing::warn!(
                "History version mismatch (expected {}, found {})",
                HISTORY_VERSION,
                data.version
            );
        }

        Ok(data)
    }

    /// Serialize history to a JSON string
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Parse` if serialization fails.
    pub fn to_json(data: &HistoryData) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> Result<HistoryData, HistoryError> {
        if !self.path.exists() {
            return Ok(HistoryData::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HistoryData::default());
        }
        Self::from_json(&content)
    }

    fn save(&self, data: &HistoryData) -> Result<(), HistoryError> {
        let json = Self::to_json(data)?;

        // Written to a sibling temp file, then renamed over the target
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| HistoryError::Io(e.error))?;

        tracing::debug!("saved {} history entries to {}", data.entries.len(), self.path.display());
        Ok(())
    }
}
