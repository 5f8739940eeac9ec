//! Dimension Persister - Abstract persistence for Dimensions
//!
//! One trait, many backends. Callers hold a `DimensionPersister` and never
//! learn whether it is backed by memory, a file or a database.

use crate::model::dimension::{Dimension, DimensionId, DimensionUuid};

/// Errors that can occur during persister operations
///
/// Lookups never use `NotFound`; a missing dimension there is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersisterError {
    /// Save referenced an id that storage never assigned
    NotFound { id: DimensionId },
    /// Another dimension already holds this uuid
    DuplicateUuid { uuid: DimensionUuid },
    /// Save tried to change the uuid of a stored dimension
    UuidImmutable { id: DimensionId },
    /// Dimension failed validation
    InvalidDimension { message: String },
    /// Backend failure (lock poisoned, I/O, serialization)
    Persistence { message: String },
}

impl core::fmt::Display for PersisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PersisterError::NotFound { id } => {
                write!(f, "Dimension not found: {}", id)
            }
            PersisterError::DuplicateUuid { uuid } => {
                write!(f, "Dimension uuid already in use: {}", uuid)
            }
            PersisterError::UuidImmutable { id } => {
                write!(f, "Cannot change uuid of dimension: {}", id)
            }
            PersisterError::InvalidDimension { message } => {
                write!(f, "Invalid dimension: {}", message)
            }
            PersisterError::Persistence { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

impl std::error::Error for PersisterError {}

/// Dimension Persister Trait
///
/// This is a PORT in hexagonal architecture.
///
/// `save_dimension` decides between insert and update from the dimension's
/// identity:
/// - id known to storage: update that record
/// - no id, uuid known to storage: update the record holding that uuid
/// - no id, uuid absent or unknown: insert under a fresh id
/// - id unknown to storage: `PersisterError::NotFound`
///
/// No atomicity holds across calls. A `get_dimension` followed by a
/// `save_dimension` may race with other writers.
pub trait DimensionPersister {
    /// Find a dimension by its storage id
    fn get_dimension(&self, id: DimensionId) -> Result<Option<Dimension>, PersisterError>;

    /// Find a dimension by its uuid
    fn get_dimension_by_uuid(
        &self,
        uuid: &DimensionUuid,
    ) -> Result<Option<Dimension>, PersisterError>;

    /// All managed dimensions, ordered by id
    fn get_all_dimensions(&self, include_retired: bool) -> Result<Vec<Dimension>, PersisterError>;

    /// Case-insensitive name search, substring unless `exact_match_only`
    fn get_dimensions(
        &self,
        name: &str,
        exact_match_only: bool,
    ) -> Result<Vec<Dimension>, PersisterError>;

    /// Insert or update; the returned dimension always has an id
    fn save_dimension(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError>;

    /// Permanently remove a dimension. Unknown dimensions are ignored.
    fn purge_dimension(&mut self, dimension: &Dimension) -> Result<(), PersisterError>;
}

impl<P: DimensionPersister + ?Sized> DimensionPersister for Box<P> {
    fn get_dimension(&self, id: DimensionId) -> Result<Option<Dimension>, PersisterError> {
        (**self).get_dimension(id)
    }

    fn get_dimension_by_uuid(
        &self,
        uuid: &DimensionUuid,
    ) -> Result<Option<Dimension>, PersisterError> {
        (**self).get_dimension_by_uuid(uuid)
    }

    fn get_all_dimensions(&self, include_retired: bool) -> Result<Vec<Dimension>, PersisterError> {
        (**self).get_all_dimensions(include_retired)
    }

    fn get_dimensions(
        &self,
        name: &str,
        exact_match_only: bool,
    ) -> Result<Vec<Dimension>, PersisterError> {
        (**self).get_dimensions(name, exact_match_only)
    }

    fn save_dimension(&mut self, dimension: &Dimension) -> Result<Dimension, PersisterError> {
        (**self).save_dimension(dimension)
    }

    fn purge_dimension(&mut self, dimension: &Dimension) -> Result<(), PersisterError> {
        (**self).purge_dimension(dimension)
    }
}

/// Checks every backend runs before writing
pub fn validate_for_save(dimension: &Dimension) -> Result<(), PersisterError> {
    if dimension.name().trim().is_empty() {
        return Err(PersisterError::InvalidDimension {
            message: "name must not be blank".to_string(),
        });
    }
    if let Some(uuid) = dimension.uuid() {
        if uuid.as_str().trim().is_empty() {
            return Err(PersisterError::InvalidDimension {
                message: "uuid must not be blank".to_string(),
            });
        }
    }
    Ok(())
}
