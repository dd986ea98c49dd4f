//! CPU worker running the attempt loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Sender, TrySendError};
use tracing::{debug, error, trace};

use crate::crypto::{Keypair, Seed};
use crate::error::SearchError;
use crate::matcher::PrefixSet;

use super::source::Draw;
use super::SeedSource;

/// The single message a worker sends to the coordinator before exiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The worker derived an address matching one of the prefixes.
    /// `index` is the seed's draw index.
    Found {
        worker_id: usize,
        index: u64,
        seed: Seed,
    },
    /// The worker could not continue.
    Failed { worker_id: usize, error: SearchError },
}

/// A CPU worker that draws seeds and tests their addresses.
pub struct SearchWorker<S> {
    /// Worker ID
    id: usize,
    /// The prefixes to match against
    prefixes: PrefixSet,
    /// Where seeds come from
    source: S,
    /// Channel for the worker's one outcome
    outcome_tx: Sender<WorkerOutcome>,
    /// Channel for attempt counts
    progress_tx: Sender<u64>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Attempts between progress reports
    report_threshold: u64,
}

impl<S: SeedSource> SearchWorker<S> {
    /// Creates a new worker.
    pub fn new(
        id: usize,
        prefixes: PrefixSet,
        source: S,
        outcome_tx: Sender<WorkerOutcome>,
        progress_tx: Sender<u64>,
        stop_flag: Arc<AtomicBool>,
        report_threshold: u64,
    ) -> Self {
        Self {
            id,
            prefixes,
            source,
            outcome_tx,
            progress_tx,
            stop_flag,
            report_threshold: report_threshold.max(1),
        }
    }

    /// Runs the worker loop.
    ///
    /// Draws seeds and tests the derived addresses until:
    /// - A match is found (seed sent as `Found`)
    /// - The seed source fails (error sent as `Failed`)
    /// - Stop flag is set
    pub fn run(mut self) {
        let mut unreported = 0u64;
        let mut since_offer = 0u64;

        loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                trace!(worker = self.id, "stop flag set");
                break;
            }

            let Draw { index, seed } = match self.source.next_seed() {
                Ok(draw) => draw,
                Err(error) => {
                    error!(worker = self.id, %error, "worker stopping");
                    self.deliver(WorkerOutcome::Failed {
                        worker_id: self.id,
                        error,
                    });
                    break;
                }
            };

            let keypair = Keypair::from_seed(&seed, 0);
            if let Some(prefix) = self.prefixes.matches(keypair.address()) {
                debug!(worker = self.id, prefix, "match found");
                self.deliver(WorkerOutcome::Found {
                    worker_id: self.id,
                    index,
                    seed,
                });
                break;
            }

            unreported += 1;
            since_offer += 1;
            if since_offer >= self.report_threshold {
                since_offer = 0;
                // Never block on progress; a full channel just defers the count.
                match self.progress_tx.try_send(unreported) {
                    Ok(()) | Err(TrySendError::Disconnected(_)) => unreported = 0,
                    Err(TrySendError::Full(_)) => {}
                }
            }
        }

        if unreported > 0 {
            let _ = self.progress_tx.try_send(unreported);
        }
    }

    /// Sends the outcome. Once the coordinator has stopped listening the
    /// send fails, and the outcome is dropped.
    fn deliver(&self, outcome: WorkerOutcome) {
        if self.outcome_tx.send(outcome).is_err() {
            trace!(worker = self.id, "outcome discarded, search already over");
        }
    }
}
