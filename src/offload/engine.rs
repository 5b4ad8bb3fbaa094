use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::error::{OffloadError, Result};
use super::job::OffloadJob;
use super::paths::{
    BASE_PATH_SENTINEL, DRIVER_NAME, LEDGER_NAME_KEY, STORAGE_BASE_PATH_KEY, artifact_path,
};
use crate::config::Config;
use crate::ledger::{LedgerId, LedgerReadHandle, OffloadedReadHandle};
use crate::observability::Metrics;
use crate::scheduler::AffinityPool;
use crate::store::{self, StoreReader};

/// Process-wide offload engine
///
/// Built once at startup; owns the storage base path and the two affinity
/// pools (orchestration and append assignment), both keyed by ledger id.
/// Passed by shared reference to every job and released via [`shutdown`].
///
/// [`shutdown`]: OffloadEngine::shutdown
pub struct OffloadEngine {
    base_path: Option<PathBuf>,
    orchestration: AffinityPool,
    appenders: Arc<AffinityPool>,
    metrics: Arc<Metrics>,
}

impl OffloadEngine {
    pub fn new(config: &Config) -> Self {
        let orchestration = AffinityPool::new(
            "offload-orchestration",
            config.offload.orchestration_workers,
        );
        let appenders = Arc::new(AffinityPool::new(
            "offload-assignment",
            config.offload.append_workers,
        ));

        info!(
            base_path = %config
                .storage
                .base_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| BASE_PATH_SENTINEL.to_string()),
            orchestration_workers = orchestration.width(),
            append_workers = appenders.width(),
            "Offload engine started"
        );

        Self {
            base_path: config.storage.base_path.clone(),
            orchestration,
            appenders,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn driver_name(&self) -> &'static str {
        DRIVER_NAME
    }

    pub fn driver_supported(driver: &str) -> bool {
        driver == DRIVER_NAME
    }

    /// Driver identity exposed to callers
    pub fn driver_metadata(&self) -> BTreeMap<String, String> {
        let path = self
            .base_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| BASE_PATH_SENTINEL.to_string());
        BTreeMap::from([(STORAGE_BASE_PATH_KEY.to_string(), path)])
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Offload a sealed ledger into a store artifact
    ///
    /// Resolves once the artifact is fully persisted and closed, or with the
    /// job's first error. A failed job leaves its partial artifact on disk.
    pub async fn offload(
        &self,
        ledger: Arc<dyn LedgerReadHandle>,
        token: Uuid,
        extra_metadata: BTreeMap<String, String>,
    ) -> Result<()> {
        let ledger_id = ledger.id();
        let job = OffloadJob {
            ledger,
            token,
            extra_metadata,
            base_path: self.base_path.clone(),
            appenders: self.appenders.clone(),
            metrics: self.metrics.clone(),
        };

        let outcome = self.orchestration.submit(ledger_id, job.run());
        let result = outcome.await.map_err(|_| OffloadError::Interrupted)?;
        match &result {
            Ok(()) => self.metrics.offload_completed(),
            Err(_) => self.metrics.offload_failed(),
        }
        result
    }

    /// Rehydrate random-read access to a previously offloaded ledger
    pub async fn read_offloaded(
        &self,
        ledger_id: LedgerId,
        token: Uuid,
        driver_metadata: &BTreeMap<String, String>,
    ) -> Result<OffloadedReadHandle> {
        let ledger_name = driver_metadata.get(LEDGER_NAME_KEY).ok_or_else(|| {
            OffloadError::Precondition(format!("driver metadata is missing {LEDGER_NAME_KEY}"))
        })?;
        let path = artifact_path(self.base_path.as_deref(), ledger_name, ledger_id, token);

        let outcome = self.orchestration.submit(ledger_id, async move {
            let reader = StoreReader::open(&path)?;
            OffloadedReadHandle::open(ledger_id, reader).map_err(OffloadError::from)
        });
        outcome.await.map_err(|_| OffloadError::Interrupted)?
    }

    /// Remove an offloaded artifact; succeeds when it is already absent
    pub async fn delete_offloaded(
        &self,
        ledger_id: LedgerId,
        token: Uuid,
        driver_metadata: &BTreeMap<String, String>,
    ) -> Result<()> {
        let ledger_name = driver_metadata.get(LEDGER_NAME_KEY).ok_or_else(|| {
            OffloadError::Precondition(format!("driver metadata is missing {LEDGER_NAME_KEY}"))
        })?;
        let path = artifact_path(self.base_path.as_deref(), ledger_name, ledger_id, token);

        store::delete_store(&path)?;
        self.metrics.artifact_deleted();
        Ok(())
    }

    /// Drain both pools and stop their workers
    pub async fn shutdown(self) {
        self.orchestration.shutdown().await;
        match Arc::try_unwrap(self.appenders) {
            Ok(pool) => pool.shutdown().await,
            Err(_) => warn!("Append pool still referenced by running jobs, skipping join"),
        }
        info!("Offload engine shut down");
    }
}
