use std::path::{Path, PathBuf};

use bytes::Bytes;
use fjall::{Config, PartitionCreateOptions, PartitionHandle};
use tracing::debug;

use super::error::{Result, StoreError};
use super::keys::{decode_record_key, encode_record_key};
use super::{CLOSED_MARKER, META_PARTITION, RECORDS_PARTITION};

/// Random-read handle over a successfully closed store artifact
///
/// Opening refuses both missing artifacts and partial ones (created but
/// never closed), so a reader can only ever observe a complete store.
pub struct StoreReader {
    _keyspace: fjall::Keyspace,
    records: PartitionHandle,
    path: PathBuf,
}

impl StoreReader {
    /// Open a closed store artifact for random reads
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(StoreError::NotFound(path));
        }

        let keyspace = Config::new(&path).open()?;
        let records = keyspace.open_partition(RECORDS_PARTITION, PartitionCreateOptions::default())?;
        let meta = keyspace.open_partition(META_PARTITION, PartitionCreateOptions::default())?;

        if meta.get(CLOSED_MARKER)?.is_none() {
            return Err(StoreError::NotClosed(path));
        }

        debug!("Opened store artifact for reads: {}", path.display());
        Ok(Self {
            _keyspace: keyspace,
            records,
            path,
        })
    }

    /// Random read of one record
    pub fn get(&self, key: i64) -> Result<Option<Bytes>> {
        let value = self.records.get(encode_record_key(key))?;
        Ok(value.map(|slice| Bytes::copy_from_slice(slice.as_ref())))
    }

    /// Ordered scan over all records, ascending by key
    pub fn iter(&self) -> impl Iterator<Item = Result<(i64, Bytes)>> + '_ {
        self.records.iter().map(|item| {
            let (key, value) = item?;
            let key = decode_record_key(key.as_ref())
                .ok_or_else(|| StoreError::CorruptKey(self.path.clone()))?;
            Ok((key, Bytes::copy_from_slice(value.as_ref())))
        })
    }

    /// Total record count (metadata record included)
    pub fn len(&self) -> Result<u64> {
        let mut count = 0;
        for item in self.records.iter() {
            item?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::keys::METADATA_KEY;
    use crate::store::writer::StoreWriter;
    use tempfile::TempDir;

    fn write_closed_store(path: &Path, entries: &[(i64, &[u8])]) {
        let mut writer = StoreWriter::create(path).unwrap();
        for (key, value) in entries {
            writer.append(*key, value).unwrap();
        }
        writer.close().unwrap();
    }

    #[test]
    fn test_open_missing_artifact_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            StoreReader::open(temp_dir.path().join("nope")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_and_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifact");
        write_closed_store(&path, &[(METADATA_KEY, b"meta"), (0, b"zero")]);

        let reader = StoreReader::open(&path).unwrap();
        assert_eq!(reader.get(0).unwrap().unwrap().as_ref(), b"zero");
        assert!(reader.get(17).unwrap().is_none());
    }

    #[test]
    fn test_scan_is_ordered_with_metadata_first() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifact");
        write_closed_store(
            &path,
            &[(METADATA_KEY, b"meta"), (0, b"a"), (1, b"b"), (2, b"c")],
        );

        let reader = StoreReader::open(&path).unwrap();
        let keys: Vec<i64> = reader.iter().map(|r| r.unwrap().0).collect();
        assert_eq!(keys, vec![METADATA_KEY, 0, 1, 2]);
        assert_eq!(reader.len().unwrap(), 4);
    }
}
