//! Durable slot adapters for the event collection.
//!
//! The whole collection is stored as one JSON array of [`Event`] under a
//! single named slot. Loading a slot that does not exist yields `None`;
//! loading a slot whose contents cannot be parsed also yields `None` and is
//! logged, so a corrupt snapshot never prevents startup.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::Event;

pub const DEFAULT_SLOT: &str = "event-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage slot '{0}' is offline")]
    Offline(String),

    #[error("storage slot '{0}' lock poisoned")]
    Poisoned(String),
}

/// A single durable key-value slot holding the serialized collection.
pub trait SnapshotStorage: Send {
    /// Slot name, for logs.
    fn slot(&self) -> &str;

    fn load(&self) -> Result<Option<Vec<Event>>, StorageError>;

    fn save(&self, events: &[Event]) -> Result<(), StorageError>;
}

fn decode(slot: &str, bytes: &[u8]) -> Option<Vec<Event>> {
    match serde_json::from_slice::<Vec<Event>>(bytes) {
        Ok(events) => Some(events),
        Err(e) => {
            tracing::warn!(
                slot = %slot,
                error = %e,
                "failed to deserialize event snapshot; treating as no data"
            );
            None
        }
    }
}

/// Stores the slot as `<data_dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    slot: String,
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: impl AsRef<Path>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let path = data_dir.as_ref().join(format!("{slot}.json"));
        Self { slot, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn slot(&self) -> &str {
        &self.slot
    }

    fn load(&self) -> Result<Option<Vec<Event>>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(decode(&self.slot, &bytes))
    }

    /// Writes to `<slot>.json.tmp` and renames over the slot so a reader
    /// never observes a partial snapshot.
    fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(events)?;
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// In-process slot. Clones share the same slot, so a second store built
/// from a clone sees what the first one persisted.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    slot: String,
    contents: Arc<Mutex<Option<String>>>,
    offline: Arc<AtomicBool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT)
    }
}

impl MemoryStorage {
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            contents: Arc::new(Mutex::new(None)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Raw slot contents as last written.
    pub fn raw(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }

    pub fn set_raw(&self, raw: impl Into<String>) -> Result<(), StorageError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| StorageError::Poisoned(self.slot.clone()))?;
        *contents = Some(raw.into());
        Ok(())
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Offline(self.slot.clone()));
        }
        Ok(())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn slot(&self) -> &str {
        &self.slot
    }

    fn load(&self) -> Result<Option<Vec<Event>>, StorageError> {
        self.check_online()?;
        Ok(self
            .raw()
            .and_then(|raw| decode(&self.slot, raw.as_bytes())))
    }

    fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        self.check_online()?;
        let json = serde_json::to_string(events)?;
        self.set_raw(json)
    }
}
