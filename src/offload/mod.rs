//! Ledger offload pipeline
//!
//! Moves the content of a sealed ledger into a single self-describing store
//! artifact and reconstructs read access later:
//!
//! - [`OffloadEngine::offload`] runs one job end to end: precondition checks,
//!   metadata record at key -1, then 100-entry batches fetched from the
//!   source and appended in strictly ascending key order.
//! - [`OffloadEngine::read_offloaded`] reopens a closed artifact as a
//!   [`crate::ledger::OffloadedReadHandle`].
//! - [`OffloadEngine::delete_offloaded`] removes an artifact, idempotently.
//!
//! All work for one ledger id is routed to the same affinity lane in each
//! pool, which is what makes the open store single-writer without locks.
//! Failures surface as exactly one failed outcome per call; partial artifacts
//! are left on disk for an explicit later delete.

pub mod engine;
pub mod error;
mod job;
pub mod paths;

pub use engine::OffloadEngine;
pub use error::{OffloadError, Result};
pub use paths::{
    BASE_PATH_SENTINEL, DRIVER_NAME, LEDGER_NAME_KEY, STORAGE_BASE_PATH_KEY, artifact_path,
};
