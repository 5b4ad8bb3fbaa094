//! Read handle rehydrated from an offloaded store artifact

use async_trait::async_trait;
use tracing::debug;

use super::{Entry, LedgerError, LedgerId, LedgerMetadata, LedgerReadHandle, Result};
use crate::store::{METADATA_KEY, StoreReader};

/// [`LedgerReadHandle`] backed by a closed store artifact
///
/// Maps store key -1 to the ledger metadata and keys >= 0 to entries, so a
/// rehydrated ledger answers the same capability set as a live one. Always
/// sealed by construction: only fully closed artifacts can be opened.
pub struct OffloadedReadHandle {
    ledger_id: LedgerId,
    reader: StoreReader,
    metadata: LedgerMetadata,
}

impl OffloadedReadHandle {
    /// Bind an opened store reader to the ledger read capability
    pub fn open(ledger_id: LedgerId, reader: StoreReader) -> Result<Self> {
        let raw = reader
            .get(METADATA_KEY)
            .map_err(|e| LedgerError::ReadFailed {
                ledger_id,
                reason: e.to_string(),
            })?
            .ok_or(LedgerError::MetadataMissing(ledger_id))?;
        let metadata: LedgerMetadata = serde_json::from_slice(&raw)?;

        debug!(
            ledger_id,
            entries = metadata.entry_count,
            "Rehydrated offloaded ledger"
        );
        Ok(Self {
            ledger_id,
            reader,
            metadata,
        })
    }
}

#[async_trait]
impl LedgerReadHandle for OffloadedReadHandle {
    fn id(&self) -> LedgerId {
        self.ledger_id
    }

    fn length(&self) -> u64 {
        self.metadata.length
    }

    fn is_sealed(&self) -> bool {
        true
    }

    fn last_confirmed(&self) -> i64 {
        self.metadata.entry_count as i64 - 1
    }

    fn metadata(&self) -> &LedgerMetadata {
        &self.metadata
    }

    async fn read_range(&self, first: i64, last: i64) -> Result<Vec<Entry>> {
        if first < 0 || last < first || last > self.last_confirmed() {
            return Err(LedgerError::ReadFailed {
                ledger_id: self.ledger_id,
                reason: format!("range [{first}, {last}] out of bounds"),
            });
        }

        let mut entries = Vec::with_capacity((last - first + 1) as usize);
        for entry_id in first..=last {
            let payload = self
                .reader
                .get(entry_id)
                .map_err(|e| LedgerError::ReadFailed {
                    ledger_id: self.ledger_id,
                    reason: e.to_string(),
                })?
                .ok_or(LedgerError::EntryMissing {
                    ledger_id: self.ledger_id,
                    entry_id,
                })?;
            entries.push(Entry {
                ledger_id: self.ledger_id,
                entry_id,
                payload,
            });
        }
        Ok(entries)
    }
}
