//! In-Memory Persister Implementation
//!
//! Useful for testing, development, and as the default backend when no
//! configuration file is given.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dimension_domain::{Dimension, DimensionId, DimensionPersister, DimensionUuid, PersisterError};
use tracing::debug;

use super::store::DimensionStore;

/// In-memory Dimension Persister
///
/// Thread-safe implementation using RwLock. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDimensionPersister {
    store: Arc<RwLock<DimensionStore>>,
}

impl InMemoryDimensionPersister {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(DimensionStore::default())),
        }
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
}

impl DimensionPersister for InMemoryDimensionPersister {
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
        let saved = self.write()?.save(dimension)?;
        debug!(id = ?saved.id(), name = saved.name(), "saved dimension");
        Ok(saved)
    }

    fn purge_dimension(&mut self, dimension: &Dimension) -> Result<(), PersisterError> {
        if self.write()?.purge(dimension) {
            debug!(id = ?dimension.id(), "purged dimension");
        } else {
            debug!(id = ?dimension.id(), "purge ignored, dimension not stored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (InMemoryDimensionPersister, Vec<Dimension>) {
        let mut repo = InMemoryDimensionPersister::new();
        let saved: Vec<Dimension> = ["Gender", "Age Group", "Age at enrollment", "Location"]
            .iter()
            .map(|name| repo.save_dimension(&Dimension::new(*name)).unwrap())
            .collect();
        (repo, saved)
    }

    #[test]
    fn test_get_dimension_missing_returns_none() {
        let (repo, _) = seeded();

        assert!(repo.get_dimension(DimensionId::new(999)).unwrap().is_none());
        assert!(repo
            .get_dimension_by_uuid(&DimensionUuid::new("nope"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_saved_dimension_round_trips() {
        let mut repo = InMemoryDimensionPersister::new();

        let saved = repo
            .save_dimension(&Dimension::new("Gender").with_description("Male / Female"))
            .unwrap();

        let id = saved.id().expect("id set after save");
        assert_eq!(repo.get_dimension(id).unwrap(), Some(saved.clone()));
        assert_eq!(
            repo.get_dimension_by_uuid(saved.uuid().unwrap()).unwrap(),
            Some(saved)
        );
    }

    #[test]
    fn test_update_does_not_duplicate() {
        let (mut repo, saved) = seeded();

        let mut gender = saved[0].clone();
        gender.set_name("Sex");
        let updated = repo.save_dimension(&gender).unwrap();

        assert_eq!(updated.id(), saved[0].id());
        assert_eq!(repo.get_all_dimensions(true).unwrap().len(), 4);
        assert_eq!(
            repo.get_dimension(updated.id().unwrap()).unwrap().unwrap().name(),
            "Sex"
        );
    }

    #[test]
    fn test_save_with_unknown_id_fails() {
        let mut repo = InMemoryDimensionPersister::new();
        let stranger = Dimension::rehydrate(DimensionId::new(5), DimensionUuid::new("x"), "Ghost");

        let err = repo.save_dimension(&stranger).unwrap_err();
        assert_eq!(
            err,
            PersisterError::NotFound {
                id: DimensionId::new(5)
            }
        );
    }

    #[test]
    fn test_uuid_is_immutable() {
        let (mut repo, saved) = seeded();

        let changed = Dimension::rehydrate(
            saved[0].id().unwrap(),
            DimensionUuid::new("other"),
            "Gender",
        );

        let err = repo.save_dimension(&changed).unwrap_err();
        assert!(matches!(err, PersisterError::UuidImmutable { .. }));
    }

    #[test]
    fn test_get_all_dimensions_respects_retired() {
        let (mut repo, saved) = seeded();

        let mut location = saved[3].clone();
        location.retire("replaced");
        repo.save_dimension(&location).unwrap();

        let active = repo.get_all_dimensions(false).unwrap();
        assert_eq!(active.len(), 3);
        assert!(active.iter().all(|d| !d.is_retired()));

        let all = repo.get_all_dimensions(true).unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.iter().any(|d| d.is_retired()));
    }

    #[test]
    fn test_get_dimensions_by_name() {
        let (repo, _) = seeded();

        let partial = repo.get_dimensions("AGE", false).unwrap();
        let names: Vec<&str> = partial.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Age Group", "Age at enrollment"]);

        let exact = repo.get_dimensions("age group", true).unwrap();
        assert_eq!(exact.len(), 1);

        assert!(repo.get_dimensions("age", true).unwrap().is_empty());
        assert!(repo.get_dimensions("weight", false).unwrap().is_empty());
    }

    #[test]
    fn test_purge_removes_dimension() {
        let (mut repo, saved) = seeded();

        repo.purge_dimension(&saved[0]).unwrap();

        assert!(repo.get_dimension(saved[0].id().unwrap()).unwrap().is_none());
        assert!(repo
            .get_dimension_by_uuid(saved[0].uuid().unwrap())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_purge_unknown_is_noop() {
        let (mut repo, _) = seeded();

        repo.purge_dimension(&Dimension::new("Never saved")).unwrap();
        assert_eq!(repo.get_all_dimensions(true).unwrap().len(), 4);
    }

    #[test]
    fn test_poisoned_lock_is_persistence_error() {
        let (mut repo, saved) = seeded();
        let holder = repo.clone();

        let _ = std::thread::spawn(move || {
            let _guard = holder.store.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(
            repo.get_all_dimensions(true).unwrap_err(),
            PersisterError::Persistence { .. }
        ));
        assert!(matches!(
            repo.get_dimension(saved[0].id().unwrap()).unwrap_err(),
            PersisterError::Persistence { .. }
        ));
        assert!(matches!(
            repo.save_dimension(&Dimension::new("Facility")).unwrap_err(),
            PersisterError::Persistence { .. }
        ));
        assert!(matches!(
            repo.purge_dimension(&saved[0]).unwrap_err(),
            PersisterError::Persistence { .. }
        ));
    }

    #[test]
    fn test_clones_share_store() {
        let mut repo = InMemoryDimensionPersister::new();
        let view = repo.clone();

        repo.save_dimension(&Dimension::new("Gender")).unwrap();
        assert_eq!(view.get_all_dimensions(true).unwrap().len(), 1);
    }
}
