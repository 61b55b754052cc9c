use chrono::Utc;
use domain::Command;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{error, info};
use uuid::Uuid;

use super::driver::ConveyorDriver;
use super::report::{ActuationOutcome, ActuationReport};

const REPORT_CHANNEL_CAPACITY: usize = 64;

/// Whether concurrent dispatches may drive the belt at the same time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationPolicy {
    /// No mutual exclusion between dispatched actuations
    Concurrent,
    /// One process-wide lock held for each whole actuation
    Serialized,
}

/// Runs the conveyor driver off the request path.
///
/// Completion and failure are logged and broadcast as [`ActuationReport`]s;
/// they never flow back to the caller of [`dispatch`](Self::dispatch).
/// Clones share the same task tracker, so [`shutdown`](Self::shutdown) on any
/// clone waits for actuations dispatched through all of them.
#[derive(Clone)]
pub struct ActuationDispatcher {
    driver: Arc<ConveyorDriver>,
    serializer: Option<Arc<Mutex<()>>>,
    reports: broadcast::Sender<ActuationReport>,
    tracker: TaskTracker,
}

impl ActuationDispatcher {
    pub fn new(driver: Arc<ConveyorDriver>, policy: ActuationPolicy) -> Self {
        let (reports, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);
        let serializer = match policy {
            ActuationPolicy::Concurrent => None,
            ActuationPolicy::Serialized => Some(Arc::new(Mutex::new(()))),
        };

        Self {
            driver,
            serializer,
            reports,
            tracker: TaskTracker::new(),
        }
    }

    pub fn policy(&self) -> ActuationPolicy {
        if self.serializer.is_some() {
            ActuationPolicy::Serialized
        } else {
            ActuationPolicy::Concurrent
        }
    }

    pub fn driver(&self) -> &ConveyorDriver {
        &self.driver
    }

    /// Number of actuations still running
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Stop tracking new work and wait until every dispatched actuation has
    /// driven its line low and released the hardware.
    pub async fn shutdown(&self) {
        self.tracker.close();
        if !self.tracker.is_empty() {
            info!(in_flight = self.tracker.len(), "⏳ Waiting for in-flight actuations");
        }
        self.tracker.wait().await;
    }

    /// Subscribe to actuation reports
    pub fn subscribe(&self) -> broadcast::Receiver<ActuationReport> {
        self.reports.subscribe()
    }

    /// Spawn the actuation and return immediately. Must be called inside a tokio runtime.
    pub fn dispatch(&self, command: Command) -> JoinHandle<ActuationReport> {
        let id = Uuid::new_v4();
        let driver = self.driver.clone();
        let serializer = self.serializer.clone();
        let reports = self.reports.clone();

        info!(actuation_id = %id, command = %command, "Dispatching conveyor actuation");

        self.tracker.spawn(async move {
            let _guard = match &serializer {
                Some(lock) => Some(lock.lock().await),
                None => None,
            };

            let started_at = Utc::now();
            let outcome = match driver.actuate(command).await {
                Ok(()) => {
                    info!(actuation_id = %id, command = %command, "✅ Conveyor actuation finished");
                    ActuationOutcome::Completed
                }
                Err(e) => {
                    error!(actuation_id = %id, command = %command, error = %e, "❌ Conveyor actuation failed");
                    ActuationOutcome::Failed(e.to_string())
                }
            };

            let report = ActuationReport {
                id,
                command,
                line: command.line(),
                outcome,
                started_at,
                finished_at: Utc::now(),
            };

            // Err only when nobody is subscribed
            let _ = reports.send(report.clone());
            report
        })
    }
}
