//! Error types for the dimension registry

use dimension_domain::PersisterError;
use thiserror::Error;

/// General application error type
#[derive(Debug, Error)]
pub enum DimensionsError {
    #[error(transparent)]
    Persister(#[from] PersisterError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DimensionsError>;
