//! # Dimension Adapter Layer
//!
//! Persistence implementations of the domain's `DimensionPersister` port.
//!
//! ## Structure
//!
//! - `repository/` - In-memory and JSON-file persisters, plus `open_persister`
//!   which picks one from configuration

pub mod repository;

pub use repository::{open_persister, InMemoryDimensionPersister, JsonFileDimensionPersister};
