//! In-memory ledger used by unit and integration tests

use bytes::Bytes;

use super::{Entry, LedgerError, LedgerId, LedgerMetadata, LedgerReadHandle, Result};
use async_trait::async_trait;

/// Sealed in-memory ledger with optional injectable read failure
pub struct MemoryLedger {
    id: LedgerId,
    entries: Vec<Bytes>,
    sealed: bool,
    metadata: LedgerMetadata,
    /// Range reads touching this entry id (or beyond) fail
    fail_reads_from: Option<i64>,
    /// Range reads repeat the previous entry id at this entry, simulating a
    /// corrupt source feed
    repeat_entry_id_at: Option<i64>,
}

impl MemoryLedger {
    pub fn sealed(id: LedgerId, payloads: Vec<Bytes>) -> Self {
        let length: u64 = payloads.iter().map(|p| p.len() as u64).sum();
        let metadata = LedgerMetadata {
            format_version: 1,
            length,
            entry_count: payloads.len() as u64,
            properties: Default::default(),
        };
        Self {
            id,
            entries: payloads,
            sealed: true,
            metadata,
            fail_reads_from: None,
            repeat_entry_id_at: None,
        }
    }

    /// Convenience: sealed ledger with `count` distinct payloads
    pub fn with_entries(id: LedgerId, count: usize) -> Self {
        let payloads = (0..count)
            .map(|i| Bytes::from(format!("entry-{id}-{i}")))
            .collect();
        Self::sealed(id, payloads)
    }

    pub fn unsealed(id: LedgerId, payloads: Vec<Bytes>) -> Self {
        let mut ledger = Self::sealed(id, payloads);
        ledger.sealed = false;
        ledger
    }

    /// Make range reads fail once they reach the given entry id
    pub fn fail_reads_from(mut self, entry_id: i64) -> Self {
        self.fail_reads_from = Some(entry_id);
        self
    }

    /// Make range reads stamp this entry with the previous entry's id,
    /// so a downstream ascending-key append rejects it
    pub fn repeat_entry_id_at(mut self, entry_id: i64) -> Self {
        self.repeat_entry_id_at = Some(entry_id);
        self
    }

    pub fn payload(&self, entry_id: i64) -> Option<&Bytes> {
        self.entries.get(usize::try_from(entry_id).ok()?)
    }
}

#[async_trait]
impl LedgerReadHandle for MemoryLedger {
    fn id(&self) -> LedgerId {
        self.id
    }

    fn length(&self) -> u64 {
        self.metadata.length
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn last_confirmed(&self) -> i64 {
        self.entries.len() as i64 - 1
    }

    fn metadata(&self) -> &LedgerMetadata {
        &self.metadata
    }

    async fn read_range(&self, first: i64, last: i64) -> Result<Vec<Entry>> {
        if let Some(fail_from) = self.fail_reads_from {
            if last >= fail_from {
                return Err(LedgerError::ReadFailed {
                    ledger_id: self.id,
                    reason: format!("injected failure at entry {fail_from}"),
                });
            }
        }
        if first < 0 || last < first || last > self.last_confirmed() {
            return Err(LedgerError::ReadFailed {
                ledger_id: self.id,
                reason: format!("range [{first}, {last}] out of bounds"),
            });
        }

        Ok((first..=last)
            .map(|entry_id| {
                let stamped_id = match self.repeat_entry_id_at {
                    Some(at) if entry_id == at => at - 1,
                    _ => entry_id,
                };
                Entry {
                    ledger_id: self.id,
                    entry_id: stamped_id,
                    payload: self.entries[entry_id as usize].clone(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_range_read() {
        let ledger = MemoryLedger::with_entries(7, 10);
        assert_eq!(ledger.last_confirmed(), 9);
        assert!(ledger.is_sealed());

        let entries = ledger.read_range(3, 5).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].entry_id, 3);
        assert_eq!(entries[2].payload, Bytes::from("entry-7-5"));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let ledger = MemoryLedger::with_entries(7, 10).fail_reads_from(5);
        assert!(ledger.read_range(0, 4).await.is_ok());
        assert!(matches!(
            ledger.read_range(3, 7).await.unwrap_err(),
            LedgerError::ReadFailed { ledger_id: 7, .. }
        ));
    }

    #[tokio::test]
    async fn test_repeated_entry_id() {
        let ledger = MemoryLedger::with_entries(7, 10).repeat_entry_id_at(4);
        let entries = ledger.read_range(0, 9).await.unwrap();
        assert_eq!(entries[3].entry_id, 3);
        assert_eq!(entries[4].entry_id, 3);
        assert_eq!(entries[5].entry_id, 5);
    }

    #[tokio::test]
    async fn test_empty_ledger_has_no_confirmed_entries() {
        let ledger = MemoryLedger::sealed(1, Vec::new());
        assert_eq!(ledger.last_confirmed(), -1);
        assert_eq!(ledger.length(), 0);
    }
}
