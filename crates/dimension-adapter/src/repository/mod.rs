//! Persistence Adapters - Persister implementations
//!
//! These implement `DimensionPersister` from dimension-domain.

pub mod in_memory;
pub mod json_file;
mod store;

pub use in_memory::InMemoryDimensionPersister;
pub use json_file::JsonFileDimensionPersister;

use dimension_domain::DimensionPersister;
use shared::StorageConfig;

/// Open the persister described by `config`
pub fn open_persister(config: &StorageConfig) -> shared::Result<Box<dyn DimensionPersister + Send>> {
    match config {
        StorageConfig::InMemory => {
            tracing::info!("using in-memory dimension store");
            Ok(Box::new(InMemoryDimensionPersister::new()))
        }
        StorageConfig::JsonFile { path } => {
            tracing::info!(path = %path.display(), "using JSON file dimension store");
            Ok(Box::new(JsonFileDimensionPersister::open(path)?))
        }
    }
}
