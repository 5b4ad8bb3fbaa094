//! Storage path derivation for offloaded artifacts
//!
//! Layout: `<basePath>/<ledgerName>/<ledgerId>-<uuid>` — one artifact per
//! offload attempt. Distinct correlation tokens for the same ledger id give
//! distinct, non-interfering artifacts.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::ledger::LedgerId;

/// Driver identity reported to callers
pub const DRIVER_NAME: &str = "filesystem";

/// Driver metadata key carrying the storage base path
pub const STORAGE_BASE_PATH_KEY: &str = "storageBasePath";

/// Metadata map key carrying the ledger's logical name
pub const LEDGER_NAME_KEY: &str = "ManagedLedgerName";

/// Sentinel reported when no base path is configured
pub const BASE_PATH_SENTINEL: &str = "null";

/// Derive the artifact path for one offload attempt
pub fn artifact_path(
    base_path: Option<&Path>,
    ledger_name: &str,
    ledger_id: LedgerId,
    token: Uuid,
) -> PathBuf {
    let artifact = format!("{ledger_id}-{token}");
    match base_path {
        Some(base) => base.join(ledger_name).join(artifact),
        None => PathBuf::from(ledger_name).join(artifact),
    }
}
