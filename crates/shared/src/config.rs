//! Configuration types for the dimension registry

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::DimensionsError;

/// Which persister backend to open
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "camelCase")]
pub enum StorageConfig {
    /// Process-local store, lost on exit
    #[default]
    InMemory,

    /// Single JSON file, rewritten after every change
    JsonFile {
        /// Location of the store file
        path: PathBuf,
    },
}

/// Top-level configuration file format (dimensions.config.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Persister backend
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// A relative store path is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;

        if let StorageConfig::JsonFile { path: store_path } = &mut config.storage {
            if store_path.as_os_str().is_empty() {
                return Err(DimensionsError::Config(
                    "storage.path cannot be empty".to_string(),
                ));
            }
            if store_path.is_relative() {
                if let Some(base) = path.parent() {
                    *store_path = base.join(&*store_path);
                }
            }
        }

        Ok(config)
    }
}
