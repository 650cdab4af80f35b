// file.rs — JsonFileStore: single-file JSON backend.
//
// The whole key space lives in one pretty-printed JSON object, rewritten
// on every mutation. Easy to inspect with jq and more than fast enough
// for the record volumes a tracker sees. The map is loaded once at open;
// all reads are served from it, all writes go through it to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store::StateStore;

/// File-backed store: the full record map as one JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or create) a store at the given path.
    ///
    /// A missing file is an empty store; the file is only created on the
    /// first write. The parent directory is created eagerly.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let records = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, records })
    }

    /// Rewrite the file from the in-memory map.
    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value);
        self.persist()
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        let existed = self.records.remove(key).is_some();
        if existed {
            self.persist()?;
        }
        Ok(existed)
    }
}
