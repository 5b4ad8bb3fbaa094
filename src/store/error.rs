use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("out-of-order append: key {key} after {last}")]
    OutOfOrderKey { last: i64, key: i64 },

    #[error("no store artifact at {0}")]
    NotFound(PathBuf),

    #[error("store at {0} was never closed")]
    NotClosed(PathBuf),

    #[error("corrupt record key in store at {0}")]
    CorruptKey(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;
