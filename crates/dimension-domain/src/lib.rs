//! # Dimension Domain Layer
//!
//! Pure domain logic for indicator dimensions and reporting column
//! descriptors, with zero external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Dimension entity, data definitions            ││
//! │  │  repository/- DimensionPersister trait (the port)           ││
//! │  │  service/   - DimensionService (retire / unretire)          ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends live in `dimension-adapter`. Switching from an in-memory store
//! to a file or a database does not touch this crate.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    data_definition::{DataDefinition, DataType, PersonDataDefinition, PersonIdDataDefinition},
    dimension::{Dimension, DimensionId, DimensionUuid, Identity},
};

pub use repository::dimension_persister::{DimensionPersister, PersisterError};

pub use service::dimension_service::DimensionService;
