//! Background snapshot persistence.
//!
//! The store hands every new state to a dedicated worker thread over a channel and
//! moves on without waiting. The worker owns success and failure handling: failures
//! are logged and counted, never propagated back into the store.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
};

use savings_core::SnapshotStorage;
use savings_domain::SavingsState;
use tracing::{debug, error, info, warn};

use crate::errors::{Result, SavingsError};

const WORKER_THREAD_NAME: &str = "savings-persistence";

enum PersistRequest {
    Save(SavingsState),
    Clear,
    Flush(Sender<()>),
}

#[derive(Debug, Default)]
struct Counters {
    saves_succeeded: AtomicUsize,
    saves_failed: AtomicUsize,
    clears_failed: AtomicUsize,
}

/// Outcome counts for the requests the worker has processed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistenceStats {
    pub saves_succeeded: usize,
    pub saves_failed: usize,
    pub clears_failed: usize,
}

/// Handle to the background thread that writes snapshots.
///
/// Dropping the handle closes the channel; the worker drains what is already queued
/// and the drop joins it.
pub struct PersistenceWorker {
    sender: Option<Sender<PersistRequest>>,
    handle: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl PersistenceWorker {
    pub fn spawn(storage: Arc<dyn SnapshotStorage>) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let counters = Arc::new(Counters::default());
        let worker_counters = Arc::clone(&counters);
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || run(storage, receiver, worker_counters))
            .map_err(|err| {
                SavingsError::Persistence(format!("failed to spawn persistence worker: {err}"))
            })?;
        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            counters,
        })
    }

    /// Queues `state` to be written. Returns immediately.
    pub fn request_save(&self, state: SavingsState) {
        self.send(PersistRequest::Save(state));
    }

    /// Queues removal of the persisted snapshot. Returns immediately.
    pub fn request_clear(&self) {
        self.send(PersistRequest::Clear);
    }

    /// Blocks until every request queued before this call has been handled.
    pub fn flush(&self) {
        let (ack, done) = mpsc::channel();
        if self.send(PersistRequest::Flush(ack)) && done.recv().is_err() {
            warn!("persistence worker stopped before acknowledging flush");
        }
    }

    pub fn stats(&self) -> PersistenceStats {
        PersistenceStats {
            saves_succeeded: self.counters.saves_succeeded.load(Ordering::SeqCst),
            saves_failed: self.counters.saves_failed.load(Ordering::SeqCst),
            clears_failed: self.counters.clears_failed.load(Ordering::SeqCst),
        }
    }

    fn send(&self, request: PersistRequest) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        if sender.send(request).is_err() {
            warn!("persistence worker is gone; request dropped");
            return false;
        }
        true
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("persistence worker panicked");
            }
        }
    }
}

fn run(storage: Arc<dyn SnapshotStorage>, receiver: Receiver<PersistRequest>, counters: Arc<Counters>) {
    while let Ok(request) = receiver.recv() {
        match request {
            PersistRequest::Save(state) => match storage.save(&state) {
                Ok(()) => {
                    counters.saves_succeeded.fetch_add(1, Ordering::SeqCst);
                    debug!(
                        contributions = state.contributions.len(),
                        "savings snapshot saved"
                    );
                }
                Err(err) => {
                    counters.saves_failed.fetch_add(1, Ordering::SeqCst);
                    error!(error = %err, "failed to save savings snapshot");
                }
            },
            PersistRequest::Clear => match storage.clear() {
                Ok(()) => info!("persisted savings snapshot cleared"),
                Err(err) => {
                    counters.clears_failed.fetch_add(1, Ordering::SeqCst);
                    error!(error = %err, "failed to clear savings snapshot");
                }
            },
            PersistRequest::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("persistence worker stopped");
}
