//! Dimension Service - Metadata lifecycle over any persister
//!
//! The persister only knows how to store dimensions. The service adds the
//! verbs callers actually use: retire with a reason, bring back, and the
//! plain lookups passed straight through.
//!
//! This is pure domain logic - no I/O of its own, no external dependencies.

use crate::model::dimension::{Dimension, DimensionId, DimensionUuid};
use crate::repository::dimension_persister::{DimensionPersister, PersisterError};

/// Dimension Service
pub struct DimensionService<P: DimensionPersister> {
    persister: P,
}

impl<P: DimensionPersister> DimensionService<P> {
    pub fn new(persister: P) -> Self {
        Self { persister }
    }

    pub fn persister(&self) -> &P {
        &self.persister
    }

    pub fn into_persister(self) -> P {
        self.persister
    }

    // ========== Lookups ==========

    pub fn get_dimension(&self, id: DimensionId) -> Result<Option<Dimension>, PersisterError> {
        self.persister.get_dimension(id)
    }

    pub fn get_dimension_by_uuid(
        &self,
        uuid: &DimensionUuid,
    ) -> Result<Option<Dimension>, PersisterError> {
        self.persister.get_dimension_by_uuid(uuid)
    }

    pub fn get_all_dimensions(
        &self,
        include_retired: bool,
    ) -> Result<Vec<Dimension>, PersisterError> {
        self.persister.get_all_dimensions(include_retired)
    }

    pub fn get_dimensions(
        &self,
        name: &str,
        exact_match_only: bool,
    ) -> Result<Vec<Dimension>, PersisterError> {
        self.persister.get_dimensions(name, exact_match_only)
    }

    // ========== Writes ==========

    pub fn save_dimension(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        self.persister.save_dimension(dimension)
    }

    /// Insert a new dimension, never overwriting a stored one.
    ///
    /// `save_dimension` treats a known uuid as an update; this refuses it.
    pub fn create_dimension(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        if let Some(id) = dimension.id() {
            return Err(PersisterError::InvalidDimension {
                message: format!("dimension already has id {}", id),
            });
        }
        if let Some(uuid) = dimension.uuid() {
            if self.persister.get_dimension_by_uuid(uuid)?.is_some() {
                return Err(PersisterError::DuplicateUuid { uuid: uuid.clone() });
            }
        }
        self.persister.save_dimension(dimension)
    }

    /// Retire a dimension and save it. The reason must not be blank.
    pub fn retire_dimension(
        &mut self,
        dimension: &Dimension,
        reason: &str,
    ) -> Result<Dimension, PersisterError> {
        if reason.trim().is_empty() {
            return Err(PersisterError::InvalidDimension {
                message: "retire reason is required".to_string(),
            });
        }

        let mut retired = dimension.clone();
        retired.retire(reason.trim());
        self.persister.save_dimension(&retired)
    }

    /// Bring a retired dimension back into default listings
    pub fn unretire_dimension(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        let mut restored = dimension.clone();
        restored.unretire();
        self.persister.save_dimension(&restored)
    }

    pub fn purge_dimension(&mut self, dimension: &Dimension) -> Result<(), PersisterError> {
        self.persister.purge_dimension(dimension)
    }
}
