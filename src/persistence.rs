//! Persisted roster snapshots
//!
//! The snapshot is stored as one JSON blob plus a separate last-update
//! timestamp, in any [`KeyValueStore`].

use crate::data::record::Record;
use crate::data::roster::Roster;
use crate::error::{Result, RosterError};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

/// Key holding the serialized [`PersistedState`]
pub const DATA_KEY: &str = "roster_dashboard_data";
/// Key holding the timestamp of the last successful save
pub const LAST_UPDATE_KEY: &str = "roster_dashboard_last_update";

/// Wire shape of a saved roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub raw_data: Vec<Record>,
    pub csv_headers: Vec<String>,
    /// ISO-8601, UTC
    pub timestamp: String,
}

impl PersistedState {
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            raw_data: roster.records().to_vec(),
            csv_headers: roster.headers().to_vec(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Rebuild a roster, validating it like a fresh load
    pub fn into_roster(self) -> Result<Roster> {
        Roster::from_records(self.csv_headers, self.raw_data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// String key/value storage owned by the host environment
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Save a snapshot of `roster` and stamp the last-update key
pub fn save(store: &dyn KeyValueStore, roster: &Roster) -> Result<PersistedState> {
    let state = PersistedState::from_roster(roster);
    store.set(DATA_KEY, &state.to_json()?)?;
    store.set(LAST_UPDATE_KEY, &state.timestamp)?;
    info!(
        "Saved roster snapshot: {} records at {}",
        state.raw_data.len(),
        state.timestamp
    );
    Ok(state)
}

/// Load the saved snapshot, if any
pub fn load(store: &dyn KeyValueStore) -> Result<Option<PersistedState>> {
    match store.get(DATA_KEY)? {
        Some(json) => {
            let state = PersistedState::from_json(&json)?;
            debug!("Loaded roster snapshot from {}", state.timestamp);
            Ok(Some(state))
        }
        None => Ok(None),
    }
}

pub fn last_update(store: &dyn KeyValueStore) -> Result<Option<String>> {
    store.get(LAST_UPDATE_KEY)
}

pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(DATA_KEY)?;
    store.remove(LAST_UPDATE_KEY)
}

/// In-process store, used by tests and one-shot runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RosterError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RosterError::Io(e)),
        }
    }
}
