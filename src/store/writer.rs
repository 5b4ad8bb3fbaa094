use std::path::{Path, PathBuf};

use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use tracing::{debug, info};

use super::error::{Result, StoreError};
use super::keys::encode_record_key;
use super::{CLOSED_MARKER, META_PARTITION, RECORDS_PARTITION};

/// Single-writer handle over a store artifact
///
/// Appends must arrive in strictly ascending key order. The artifact only
/// becomes readable after [`StoreWriter::close`] writes the closed marker;
/// a dropped writer leaves a partial artifact on disk that no reader will
/// ever accept.
pub struct StoreWriter {
    keyspace: Keyspace,
    records: PartitionHandle,
    meta: PartitionHandle,
    path: PathBuf,
    last_key: Option<i64>,
    records_appended: u64,
}

impl StoreWriter {
    /// Create a new store artifact at the given path for writing
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Creating store artifact at: {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(&path).open()?;
        let records = keyspace.open_partition(RECORDS_PARTITION, PartitionCreateOptions::default())?;
        let meta = keyspace.open_partition(META_PARTITION, PartitionCreateOptions::default())?;

        Ok(Self {
            keyspace,
            records,
            meta,
            path,
            last_key: None,
            records_appended: 0,
        })
    }

    /// Append one record; keys must be strictly ascending
    pub fn append(&mut self, key: i64, value: &[u8]) -> Result<()> {
        if let Some(last) = self.last_key {
            if key <= last {
                return Err(StoreError::OutOfOrderKey { last, key });
            }
        }

        self.records.insert(encode_record_key(key), value)?;
        self.last_key = Some(key);
        self.records_appended += 1;
        Ok(())
    }

    /// Number of records appended so far
    pub fn record_count(&self) -> u64 {
        self.records_appended
    }

    /// Flush everything and mark the artifact as fully written
    pub fn close(self) -> Result<()> {
        self.meta.insert(CLOSED_MARKER, [1u8])?;
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        debug!(
            records = self.record_count(),
            "Store artifact closed: {}",
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
