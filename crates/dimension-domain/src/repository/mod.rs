//! Persister Traits - The "Ports" of Hexagonal Architecture
//!
//! ```text
//! Domain Layer              │  Adapter Layer
//! ──────────────────────────┼──────────────────────────────
//! trait DimensionPersister  │  InMemoryDimensionPersister
//!   fn save_dimension()     │  JsonFileDimensionPersister
//!   fn get_dimension()      │
//! ```

pub mod dimension_persister;
