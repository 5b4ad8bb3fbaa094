//! Fjall-backed sorted store artifacts
//!
//! A store artifact is an ordered `i64 -> bytes` container on disk:
//!
//! - `records` partition: order-preserving encoded key -> record bytes.
//!   Key -1 is reserved for the serialized ledger metadata; keys >= 0 hold
//!   entries at `key = entry id`.
//! - `meta` partition: a `closed` marker written by [`StoreWriter::close`].
//!
//! Writers enforce strictly ascending key order. Readers refuse any artifact
//! without the closed marker, so a partial store (failed or still-running
//! offload) is never advertised as readable.

pub mod error;
pub mod keys;
pub mod reader;
pub mod writer;

use std::path::Path;

use tracing::info;

pub use error::{Result, StoreError};
pub use keys::METADATA_KEY;
pub use reader::StoreReader;
pub use writer::StoreWriter;

pub(crate) const RECORDS_PARTITION: &str = "records";
pub(crate) const META_PARTITION: &str = "meta";
pub(crate) const CLOSED_MARKER: &[u8] = b"closed";

/// Recursively remove a store artifact
///
/// Idempotent: removing an artifact that is already absent succeeds.
pub fn delete_store<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            info!("Deleted store artifact at: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
