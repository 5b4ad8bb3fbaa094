//! Ledger domain types and the source read-handle capability
//!
//! A ledger is a sealed, append-only sequence of entries identified by a
//! 64-bit id. Entry ids are dense and contiguous starting at 0. The offload
//! engine consumes any [`LedgerReadHandle`] as its source; the rehydrated
//! handle in [`rehydrated`] exposes the same capability over an offloaded
//! store artifact.

pub mod rehydrated;
pub mod testing; // Exposed for integration tests (MemoryLedger)

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use rehydrated::OffloadedReadHandle;

/// 64-bit ledger identifier
pub type LedgerId = u64;

/// One payload unit of a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub ledger_id: LedgerId,
    pub entry_id: i64,
    pub payload: Bytes,
}

/// Ledger metadata, stored at the reserved store key -1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMetadata {
    pub format_version: u32,
    /// Total payload bytes in the ledger
    pub length: u64,
    pub entry_count: u64,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("range read failed for ledger {ledger_id}: {reason}")]
    ReadFailed { ledger_id: LedgerId, reason: String },

    #[error("entry {entry_id} missing from offloaded ledger {ledger_id}")]
    EntryMissing { ledger_id: LedgerId, entry_id: i64 },

    #[error("offloaded ledger {0} has no metadata record")]
    MetadataMissing(LedgerId),

    #[error("metadata decode error: {0}")]
    MetadataDecode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Read capability over a ledger, live or offloaded
#[async_trait]
pub trait LedgerReadHandle: Send + Sync {
    fn id(&self) -> LedgerId;

    /// Total payload bytes
    fn length(&self) -> u64;

    /// Whether the ledger is sealed (no further appends possible)
    fn is_sealed(&self) -> bool;

    /// Highest confirmed entry id; -1 for an empty ledger
    fn last_confirmed(&self) -> i64;

    fn metadata(&self) -> &LedgerMetadata;

    /// Read the inclusive entry range `[first, last]`
    async fn read_range(&self, first: i64, last: i64) -> Result<Vec<Entry>>;
}
