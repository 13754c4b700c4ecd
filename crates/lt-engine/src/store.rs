//! The persistence gateway: durable storage for the score ledger.
//!
//! The store is an injected capability so the engine can be tested against
//! an in-memory fake. Balances and the undo buffer are kept as two
//! independent records: a corrupt or missing buffer never invalidates the
//! balances, and vice versa. Unreadable records fall back to empty defaults
//! with a logged warning; they are never fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ledger::{BalanceEntry, ScoreTransaction};

/// The durably stored ledger state: balances plus the undo buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Participant totals.
    pub balances: Vec<BalanceEntry>,
    /// Transactions still eligible for undo, oldest first.
    pub transactions: Vec<ScoreTransaction>,
}

/// Durable key-value storage for ledger state.
///
/// `load` is called exactly once, before any `save`; implementations never
/// fail it, falling back to defaults instead. `save` is called synchronously
/// after every ledger mutation.
pub trait StateStore {
    /// Read the last durably written state, or defaults if none exists or
    /// the payload fails to parse.
    fn load(&self) -> PersistedState;

    /// Durably write the given state.
    fn save(&mut self, state: &PersistedState) -> io::Result<()>;

    /// Remove all durably stored state.
    fn purge(&mut self) -> io::Result<()>;
}

const BALANCES_FILE: &str = "scores.json";
const BUFFER_FILE: &str = "undo.json";

/// File-backed store keeping two JSON records in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the two records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_record<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                warn!("cannot read {}: {e}, starting from defaults", path.display());
                return T::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "corrupt record {}: {e}, starting from defaults",
                    path.display()
                );
                T::default()
            }
        }
    }

    fn write_record<T: Serialize>(&self, file: &str, value: &T) -> io::Result<()> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        // Temp-file-then-rename so a crash mid-write leaves the old record
        // intact.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)
    }

    fn remove_record(&self, file: &str) -> io::Result<()> {
        match fs::remove_file(self.dir.join(file)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> PersistedState {
        PersistedState {
            balances: self.read_record(BALANCES_FILE),
            transactions: self.read_record(BUFFER_FILE),
        }
    }

    fn save(&mut self, state: &PersistedState) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        self.write_record(BALANCES_FILE, &state.balances)?;
        self.write_record(BUFFER_FILE, &state.transactions)
    }

    fn purge(&mut self) -> io::Result<()> {
        self.remove_record(BALANCES_FILE)?;
        self.remove_record(BUFFER_FILE)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Option<PersistedState>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with state, as if from a previous run.
    pub fn with_state(state: PersistedState) -> Self {
        Self { state: Some(state) }
    }

    /// The last saved state, if any.
    pub fn saved(&self) -> Option<&PersistedState> {
        self.state.as_ref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> PersistedState {
        self.state.clone().unwrap_or_default()
    }

    fn save(&mut self, state: &PersistedState) -> io::Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn purge(&mut self) -> io::Result<()> {
        self.state = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn state() -> PersistedState {
        PersistedState {
            balances: vec![BalanceEntry {
                name: "Ben".to_string(),
                points: 6,
            }],
            transactions: vec![ScoreTransaction {
                name: "Ben".to_string(),
                delta: 6,
                timestamp: Utc::now(),
            }],
        }
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&state()).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.balances.len(), 1);
        assert_eq!(loaded.balances[0].points, 6);
        assert_eq!(loaded.transactions.len(), 1);
    }

    #[test]
    fn missing_files_load_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nonexistent"));
        let loaded = store.load();
        assert!(loaded.balances.is_empty());
        assert!(loaded.transactions.is_empty());
    }

    #[test]
    fn corrupt_balances_do_not_invalidate_buffer() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&state()).unwrap();

        fs::write(dir.path().join(BALANCES_FILE), "{not json").unwrap();

        let loaded = store.load();
        assert!(loaded.balances.is_empty());
        assert_eq!(loaded.transactions.len(), 1);
    }

    #[test]
    fn corrupt_buffer_does_not_invalidate_balances() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&state()).unwrap();

        fs::write(dir.path().join(BUFFER_FILE), "[[[").unwrap();

        let loaded = store.load();
        assert_eq!(loaded.balances.len(), 1);
        assert!(loaded.transactions.is_empty());
    }

    #[test]
    fn purge_removes_records() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&state()).unwrap();
        store.purge().unwrap();

        assert!(!dir.path().join(BALANCES_FILE).exists());
        assert!(!dir.path().join(BUFFER_FILE).exists());
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn purge_on_empty_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("fresh"));
        store.purge().unwrap();
    }

    #[test]
    fn no_tmp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&state()).unwrap();
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), PersistedState::default());

        store.save(&state()).unwrap();
        assert_eq!(store.load().balances[0].name, "Ben");

        store.purge().unwrap();
        assert_eq!(store.load(), PersistedState::default());
    }
}
