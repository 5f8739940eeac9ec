//! Backend-neutral dimension store
//!
//! Holds the records and the id counter. Both persisters wrap one of these
//! behind a lock; the JSON persister also serializes it.

use std::collections::BTreeMap;

use dimension_domain::repository::dimension_persister::validate_for_save;
use dimension_domain::{Dimension, DimensionId, DimensionUuid, Identity, PersisterError};

#[derive(Debug, Clone)]
pub(crate) struct DimensionStore {
    /// Keyed by id so listings come out in id order
    records: BTreeMap<DimensionId, Dimension>,
    /// Next id to hand out. Only ever grows, so purged ids are never reused.
    next_id: i32,
}

impl Default for DimensionStore {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl DimensionStore {
    /// Rebuild a store from previously saved records.
    ///
    /// Every record must carry an id and a uuid, and both must be unique.
    pub(crate) fn from_records(
        next_id: i32,
        dimensions: Vec<Dimension>,
    ) -> Result<Self, PersisterError> {
        let mut store = Self {
            records: BTreeMap::new(),
            next_id: next_id.max(1),
        };

        for dimension in dimensions {
            let (id, uuid) = match (dimension.id(), dimension.uuid()) {
                (Some(id), Some(uuid)) => (id, uuid.clone()),
                _ => {
                    return Err(PersisterError::Persistence {
                        message: format!("stored dimension '{}' has no identity", dimension.name()),
                    })
                }
            };
            if store.find_id_by_uuid(&uuid).is_some() {
                return Err(PersisterError::DuplicateUuid { uuid });
            }
            if store.records.contains_key(&id) {
                return Err(PersisterError::Persistence {
                    message: format!("duplicate stored dimension id: {}", id),
                });
            }
            let following = id.value().checked_add(1).ok_or_else(id_space_exhausted)?;
            store.next_id = store.next_id.max(following);
            store.records.insert(id, dimension);
        }

        Ok(store)
    }

    pub(crate) fn next_id(&self) -> i32 {
        self.next_id
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &Dimension> {
        self.records.values()
    }

    pub(crate) fn get(&self, id: DimensionId) -> Option<Dimension> {
        self.records.get(&id).cloned()
    }

    pub(crate) fn get_by_uuid(&self, uuid: &DimensionUuid) -> Option<Dimension> {
        self.find_id_by_uuid(uuid).and_then(|id| self.get(id))
    }

    pub(crate) fn all(&self, include_retired: bool) -> Vec<Dimension> {
        self.records
            .values()
            .filter(|d| include_retired || !d.is_retired())
            .cloned()
            .collect()
    }

    pub(crate) fn search(&self, name: &str, exact_match_only: bool) -> Vec<Dimension> {
        self.records
            .values()
            .filter(|d| d.matches_name(name, exact_match_only))
            .cloned()
            .collect()
    }

    /// Insert or update, resolving identity against what is stored
    pub(crate) fn save(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        validate_for_save(dimension)?;

        match dimension.identity() {
            Identity::Persisted(id) => self.update(id, dimension),
            Identity::Transient => {
                let known = dimension.uuid().and_then(|uuid| self.find_id_by_uuid(uuid));
                match known {
                    Some(id) => self.update(id, dimension),
                    None => self.insert(dimension),
                }
            }
        }
    }

    /// Whether `dimension` resolves to a stored record, by id or else by uuid
    pub(crate) fn contains(&self, dimension: &Dimension) -> bool {
        self.resolve_id(dimension)
            .is_some_and(|id| self.records.contains_key(&id))
    }

    /// Remove a dimension, returning whether anything was removed
    pub(crate) fn purge(&mut self, dimension: &Dimension) -> bool {
        match self.resolve_id(dimension) {
            Some(id) => self.records.remove(&id).is_some(),
            None => false,
        }
    }

    fn resolve_id(&self, dimension: &Dimension) -> Option<DimensionId> {
        dimension
            .id()
            .or_else(|| dimension.uuid().and_then(|uuid| self.find_id_by_uuid(uuid)))
    }

    fn insert(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        let id = DimensionId::new(self.next_id);
        let following = self.next_id.checked_add(1).ok_or_else(id_space_exhausted)?;
        let uuid = match dimension.uuid() {
            Some(uuid) => uuid.clone(),
            None => self.generate_uuid()?,
        };

        let mut saved = dimension.clone();
        saved.assign_identity(id, uuid);

        self.next_id = following;
        self.records.insert(id, saved.clone());
        Ok(saved)
    }

    fn update(&mut self, id: DimensionId, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        let stored_uuid = self
            .records
            .get(&id)
            .and_then(|stored| stored.uuid().cloned())
            .ok_or(PersisterError::NotFound { id })?;

        if let Some(uuid) = dimension.uuid() {
            if *uuid != stored_uuid {
                if self.find_id_by_uuid(uuid).is_some() {
                    return Err(PersisterError::DuplicateUuid { uuid: uuid.clone() });
                }
                return Err(PersisterError::UuidImmutable { id });
            }
        }

        let mut saved = dimension.clone();
        saved.assign_identity(id, stored_uuid);

        self.records.insert(id, saved.clone());
        Ok(saved)
    }

    fn find_id_by_uuid(&self, uuid: &DimensionUuid) -> Option<DimensionId> {
        self.records
            .iter()
            .find(|(_, d)| d.uuid() == Some(uuid))
            .map(|(id, _)| *id)
    }

    fn generate_uuid(&self) -> Result<DimensionUuid, PersisterError> {
        let uuid = DimensionUuid::new(uuid::Uuid::new_v4().to_string());
        if self.find_id_by_uuid(&uuid).is_some() {
            return Err(PersisterError::DuplicateUuid { uuid });
        }
        Ok(uuid)
    }
}

fn id_space_exhausted() -> PersisterError {
    PersisterError::Persistence {
        message: "id space exhausted".to_string(),
    }
}
