//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording engine counters
#[derive(Debug, Default)]
pub struct Metrics {
    offloads_completed: AtomicU64,
    offloads_failed: AtomicU64,
    entries_offloaded: AtomicU64,
    artifacts_deleted: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offload_completed(&self) {
        self.offloads_completed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "offloads_completed", "Metric incremented");
    }

    pub fn offload_failed(&self) {
        self.offloads_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "offloads_failed", "Metric incremented");
    }

    pub fn entries_offloaded(&self, count: u64) {
        self.entries_offloaded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn artifact_deleted(&self) {
        self.artifacts_deleted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "artifacts_deleted", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            offloads_completed: self.offloads_completed.load(Ordering::Relaxed),
            offloads_failed: self.offloads_failed.load(Ordering::Relaxed),
            entries_offloaded: self.entries_offloaded.load(Ordering::Relaxed),
            artifacts_deleted: self.artifacts_deleted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub offloads_completed: u64,
    pub offloads_failed: u64,
    pub entries_offloaded: u64,
    pub artifacts_deleted: u64,
}
