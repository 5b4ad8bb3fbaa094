use std::path::PathBuf;

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum OffloadError {
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("source read error: {0}")]
    Source(#[from] LedgerError),

    #[error("metadata encoding error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no offloaded artifact at {0}")]
    NotFound(PathBuf),

    #[error("offload task interrupted")]
    Interrupted,
}

impl From<StoreError> for OffloadError {
    fn from(err: StoreError) -> Self {
        match err {
            // A missing artifact and a never-closed one look the same to
            // callers: there is nothing valid to read.
            StoreError::NotFound(path) | StoreError::NotClosed(path) => {
                OffloadError::NotFound(path)
            }
            other => OffloadError::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, OffloadError>;
