//! Thread-affinity scheduling
//!
//! An [`AffinityPool`] is a fixed set of independent, ordered lanes. Every
//! lane is a tokio task draining an mpsc channel of boxed futures one at a
//! time. Work is routed by `hash(key) % width`, so:
//!
//! - all work submitted for one key runs on the same lane, in submission order
//! - work for two keys never contends (no locks, just message passing)
//! - no two tasks for the same key ever run concurrently
//!
//! The offload engine keys both of its pools by ledger id, which is what lets
//! a job mutate its open store without any locking.

use std::future::Future;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

type LaneTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Fixed-width pool of ordered single-consumer execution lanes
pub struct AffinityPool {
    name: String,
    lanes: Vec<mpsc::UnboundedSender<LaneTask>>,
    workers: Vec<JoinHandle<()>>,
}

impl AffinityPool {
    /// Spawn a pool with `width` lanes (clamped to at least one)
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        let name = name.into();
        let width = width.max(1);

        let mut lanes = Vec::with_capacity(width);
        let mut workers = Vec::with_capacity(width);

        for lane_id in 0..width {
            let (tx, mut rx) = mpsc::unbounded_channel::<LaneTask>();
            let lane_name = name.clone();
            let worker = tokio::spawn(async move {
                while let Some(task) = rx.recv().await {
                    task.await;
                }
                debug!(pool = %lane_name, lane_id, "Lane drained, worker exiting");
            });
            lanes.push(tx);
            workers.push(worker);
        }

        debug!(pool = %name, width, "Affinity pool started");
        Self {
            name,
            lanes,
            workers,
        }
    }

    /// Number of lanes in this pool
    pub fn width(&self) -> usize {
        self.lanes.len()
    }

    fn lane_for(&self, key: u64) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.lanes.len() as u64) as usize
    }

    /// Submit a future to the lane owning `key`
    ///
    /// Returns a oneshot receiver resolving to the future's output. The
    /// receiver yields `RecvError` if the pool was shut down before the task
    /// ran; callers treat that as an interruption.
    pub fn submit<T, F>(&self, key: u64, future: F) -> oneshot::Receiver<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let lane = self.lane_for(key);
        let task: LaneTask = Box::pin(async move {
            // Receiver may have been dropped; the work still ran in order.
            let _ = tx.send(future.await);
        });

        if self.lanes[lane].send(task).is_err() {
            debug!(pool = %self.name, key, lane, "Lane closed, task dropped");
        }
        rx
    }

    /// Close all lanes and wait for queued work to finish
    pub async fn shutdown(self) {
        drop(self.lanes);
        for worker in self.workers {
            let _ = worker.await;
        }
        debug!(pool = %self.name, "Affinity pool shut down");
    }
}
