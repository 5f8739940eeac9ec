//! JSON File Persister Implementation
//!
//! Keeps the whole store in memory and rewrites one JSON file after every
//! successful change. The file is written to a sibling temp file first and
//! renamed into place, so readers never see a half-written store.
//!
//! ```json
//! {
//!   "nextId": 3,
//!   "dimensions": [
//!     { "id": 1, "uuid": "…", "name": "Gender", "retired": false }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dimension_domain::{Dimension, DimensionId, DimensionPersister, DimensionUuid, PersisterError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::store::DimensionStore;

/// On-disk shape of a single dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DimensionRecord {
    id: i32,
    uuid: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    retired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retire_reason: Option<String>,
}

impl DimensionRecord {
    fn from_dimension(dimension: &Dimension) -> Option<Self> {
        Some(Self {
            id: dimension.id()?.value(),
            uuid: dimension.uuid()?.as_str().to_string(),
            name: dimension.name().to_string(),
            description: dimension.description().map(str::to_string),
            retired: dimension.is_retired(),
            retire_reason: dimension.retire_reason().map(str::to_string),
        })
    }

    fn into_dimension(self) -> Dimension {
        let mut dimension =
            Dimension::rehydrate(DimensionId::new(self.id), DimensionUuid::new(self.uuid), self.name);
        dimension.set_description(self.description);
        dimension.restore_retirement(self.retired, self.retire_reason);
        dimension
    }
}

/// On-disk shape of the whole store
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    #[serde(default)]
    next_id: i32,
    #[serde(default)]
    dimensions: Vec<DimensionRecord>,
}

/// JSON file Dimension Persister
///
/// Clones share the same in-memory store and file.
#[derive(Debug, Clone)]
pub struct JsonFileDimensionPersister {
    path: PathBuf,
    store: Arc<RwLock<DimensionStore>>,
}

impl JsonFileDimensionPersister {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> shared::Result<Self> {
        let path = path.into();

        let store = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: StoreFile = serde_json::from_str(&content)?;
            let dimensions = file
                .dimensions
                .into_iter()
                .map(DimensionRecord::into_dimension)
                .collect();
            DimensionStore::from_records(file.next_id, dimensions)?
        } else {
            DimensionStore::default()
        };

        info!(
            path = %path.display(),
            count = store.records().count(),
            "opened dimension store"
        );

        Ok(Self {
            path,
            store: Arc::new(RwLock::new(store)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, DimensionStore>, PersisterError> {
        self.store.read().map_err(|_| PersisterError::Persistence {
            message: "Failed to acquire read lock".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, DimensionStore>, PersisterError> {
        self.store.write().map_err(|_| PersisterError::Persistence {
            message: "Failed to acquire write lock".to_string(),
        })
    }

    /// Apply `change` to a copy of the store, persist the copy, then swap it in
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut DimensionStore) -> Result<T, PersisterError>,
    ) -> Result<T, PersisterError> {
        let mut guard = self.write()?;
        let mut next = guard.clone();
        let result = change(&mut next)?;
        self.flush(&next)?;
        *guard = next;
        Ok(result)
    }

    fn flush(&self, store: &DimensionStore) -> Result<(), PersisterError> {
        let file = StoreFile {
            next_id: store.next_id(),
            dimensions: store
                .records()
                .filter_map(DimensionRecord::from_dimension)
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(persistence_error)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(persistence_error)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(persistence_error)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(persistence_error(e));
        }
        Ok(())
    }
}

fn persistence_error(err: impl std::fmt::Display) -> PersisterError {
    PersisterError::Persistence {
        message: err.to_string(),
    }
}

impl DimensionPersister for JsonFileDimensionPersister {
    fn get_dimension(&self, id: DimensionId) -> Result<Option<Dimension>, PersisterError> {
        Ok(self.read()?.get(id))
    }

    fn get_dimension_by_uuid(
        &self,
        uuid: &DimensionUuid,
    ) -> Result<Option<Dimension>, PersisterError> {
        Ok(self.read()?.get_by_uuid(uuid))
    }

    fn get_all_dimensions(&self, include_retired: bool) -> Result<Vec<Dimension>, PersisterError> {
        Ok(self.read()?.all(include_retired))
    }

    fn get_dimensions(
        &self,
        name: &str,
        exact_match_only: bool,
    ) -> Result<Vec<Dimension>, PersisterError> {
        Ok(self.read()?.search(name, exact_match_only))
    }

    fn save_dimension(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        let saved = self.mutate(|store| store.save(dimension))?;
        debug!(id = ?saved.id(), name = saved.name(), path = %self.path.display(), "saved dimension");
        Ok(saved)
    }

    fn purge_dimension(&mut self, dimension: &Dimension) -> Result<(), PersisterError> {
        if !self.read()?.contains(dimension) {
            debug!(id = ?dimension.id(), "purge ignored, dimension not stored");
            return Ok(());
        }
        self.mutate(|store| Ok(store.purge(dimension)))?;
        debug!(id = ?dimension.id(), path = %self.path.display(), "purged dimension");
        Ok(())
    }
}
