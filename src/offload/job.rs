use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use super::error::{OffloadError, Result};
use super::paths::{LEDGER_NAME_KEY, artifact_path};
use crate::ledger::{Entry, LedgerReadHandle};
use crate::observability::Metrics;
use crate::scheduler::AffinityPool;
use crate::store::{METADATA_KEY, StoreWriter};

/// Entries fetched from the source per batch
pub(crate) const ENTRIES_PER_READ: i64 = 100;

/// One offload attempt, run start to finish on an orchestration lane
///
/// The pipeline is strictly sequential: fetch a batch, hand the writer to an
/// append task on the assignment pool, take the writer back, repeat. At most
/// one batch is resident at a time and the open store only ever has one
/// owner, so no locking is needed anywhere.
pub(crate) struct OffloadJob {
    pub(crate) ledger: Arc<dyn LedgerReadHandle>,
    pub(crate) token: Uuid,
    pub(crate) extra_metadata: BTreeMap<String, String>,
    pub(crate) base_path: Option<PathBuf>,
    pub(crate) appenders: Arc<AffinityPool>,
    pub(crate) metrics: Arc<Metrics>,
}

impl OffloadJob {
    pub(crate) async fn run(self) -> Result<()> {
        let ledger_id = self.ledger.id();

        // Preconditions come before any I/O: no artifact is created for a
        // ledger that should never be offloaded.
        if self.ledger.length() == 0
            || !self.ledger.is_sealed()
            || self.ledger.last_confirmed() < 0
        {
            return Err(OffloadError::Precondition(
                "an empty or unsealed ledger should never be offloaded".to_string(),
            ));
        }
        let ledger_name = self.extra_metadata.get(LEDGER_NAME_KEY).ok_or_else(|| {
            OffloadError::Precondition(format!("extra metadata is missing {LEDGER_NAME_KEY}"))
        })?;

        let path = artifact_path(self.base_path.as_deref(), ledger_name, ledger_id, self.token);
        info!(
            ledger_id,
            token = %self.token,
            path = %path.display(),
            "Starting offload"
        );

        let mut writer = StoreWriter::create(&path)?;

        // Metadata goes in first at the reserved key, so opening a store
        // never has to scan entries to find it.
        let metadata = serde_json::to_vec(self.ledger.metadata())?;
        writer.append(METADATA_KEY, &metadata)?;

        let last_confirmed = self.ledger.last_confirmed();
        let mut slot = Some(writer);
        let mut terminal: Option<OffloadError> = None;
        let mut batch_start = 0i64;

        while batch_start <= last_confirmed {
            let batch_end = (batch_start + ENTRIES_PER_READ - 1).min(last_confirmed);
            debug!(ledger_id, start = batch_start, end = batch_end, "Reading ledger entries");

            let entries = match self.ledger.read_range(batch_start, batch_end).await {
                Ok(entries) => entries,
                Err(e) => {
                    terminal = Some(e.into());
                    break;
                }
            };

            let Some(batch_writer) = slot.take() else {
                break;
            };
            // The writer rides along into the append task and comes back
            // with the batch outcome: ownership transfer instead of a lock.
            let outcome = self.appenders.submit(ledger_id, async move {
                let mut writer = batch_writer;
                let result = append_batch(&mut writer, &entries);
                (writer, result)
            });

            match outcome.await {
                Ok((writer, Ok(appended))) => {
                    slot = Some(writer);
                    self.metrics.entries_offloaded(appended);
                }
                Ok((_, Err(e))) => {
                    terminal = Some(e.into());
                    break;
                }
                Err(_) => {
                    terminal = Some(OffloadError::Interrupted);
                    break;
                }
            }
            batch_start = batch_end + 1;
        }

        if let Some(err) = terminal {
            // The partial artifact stays on disk; cleanup is an explicit
            // delete_offloaded call, never automatic.
            error!(
                ledger_id,
                token = %self.token,
                path = %path.display(),
                error = %err,
                "Offload failed"
            );
            return Err(err);
        }

        match slot {
            Some(writer) => {
                writer.close()?;
                info!(
                    ledger_id,
                    token = %self.token,
                    entries = last_confirmed + 1,
                    "Offload complete"
                );
                Ok(())
            }
            None => Err(OffloadError::Interrupted),
        }
    }
}

fn append_batch(writer: &mut StoreWriter, entries: &[Entry]) -> crate::store::Result<u64> {
    let mut appended = 0;
    for entry in entries {
        writer.append(entry.entry_id, &entry.payload)?;
        appended += 1;
    }
    Ok(appended)
}
