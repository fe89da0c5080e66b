//! The brain - file-backed key-value storage for plugins
//!
//! The in-memory map is the source of truth; the file is a snapshot
//! rewritten wholesale by `save()`. Load happens once at startup and a
//! broken file downgrades to an empty store with a warning, so the bot
//! stays available at the cost of the old state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

use crate::application::errors::StorageError;

const DUMP_FILE: &str = "braindump.json";

pub struct Brain {
    path: PathBuf,
    data: RwLock<HashMap<String, Value>>,
}

impl Brain {
    /// Read the dump file under `dir`. A missing or empty file yields
    /// an empty store; anything unreadable or unparsable yields an
    /// empty store and a warning naming the file.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(DUMP_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.is_empty() => HashMap::new(),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(data) => data,
                Err(e) => {
                    warn!("discarding corrupt brain file {}: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("unable to read brain file {}: {e}", path.display());
                HashMap::new()
            }
        };
        Self {
            path,
            data: RwLock::new(data),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        let value = data.get(key)?.clone();
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("brain key '{key}' does not deserialize: {e}");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), value);
        Ok(())
    }

    /// Write the whole map to disk. Blocks until the snapshot is
    /// durable; a returned `Ok` means the file on disk is the state
    /// that was in memory when the call started. The snapshot goes to a
    /// temp file first and is renamed into place so a crash mid-write
    /// cannot leave a truncated dump.
    pub fn save(&self) -> Result<(), StorageError> {
        let snapshot = {
            let data = self.data.read().unwrap_or_else(|e| e.into_inner());
            serde_json::to_string(&*data)
                .map_err(|e| StorageError::Serialization(e.to_string()))?
        };
        debug!("saving braindump to {}", self.path.display());
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, snapshot)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
