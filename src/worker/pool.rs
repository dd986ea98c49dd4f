//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use tracing::{debug, error, warn};

use crate::crypto::Seed;
use crate::error::SearchError;
use crate::matcher::PrefixSet;

use super::cpu::{SearchWorker, WorkerOutcome};
use super::progress::ProgressAggregator;
use super::SeedSource;

/// Capacity of the progress channel.
const PROGRESS_CHANNEL_CAPACITY: usize = 100;

/// How often a waiting coordinator re-checks its interrupt flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Settings shared by every worker of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Number of worker threads
    pub workers: usize,
    /// Base attempts between progress reports; worker `i` uses `base + i`
    pub progress_interval: u64,
    /// Suppress the progress line
    pub quiet: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            progress_interval: 500,
            quiet: false,
        }
    }
}

/// A running set of workers plus their progress aggregator.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during shutdown)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Aggregator thread, yields the attempt total
    aggregator: Option<JoinHandle<u64>>,
    /// Channel receiver for worker outcomes; dropped on shutdown
    outcome_rx: Option<Receiver<WorkerOutcome>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Attempts counted once the aggregator finished
    attempts: u64,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Spawns `options.workers` workers and the progress aggregator.
    pub fn spawn<S: SeedSource>(
        prefixes: &PrefixSet,
        options: &SearchOptions,
        source: S,
        estimate: f64,
    ) -> Self {
        let num_workers = options.workers.max(1);
        // Each worker sends at most one outcome, so sends never block.
        let (outcome_tx, outcome_rx) = bounded(num_workers);
        let (progress_tx, progress_rx) = bounded(PROGRESS_CHANNEL_CAPACITY);
        let stop_flag = Arc::new(AtomicBool::new(false));

        let aggregator = ProgressAggregator::new(progress_rx, estimate, options.quiet);
        let aggregator = thread::Builder::new()
            .name("vanity-progress".into())
            .spawn(move || aggregator.run());
        let aggregator = match aggregator {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "progress aggregator unavailable");
                None
            }
        };

        let mut handles = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let worker = SearchWorker::new(
                id,
                prefixes.clone(),
                source.clone(),
                outcome_tx.clone(),
                progress_tx.clone(),
                stop_flag.clone(),
                options.progress_interval + id as u64,
            );

            match thread::Builder::new()
                .name(format!("vanity-worker-{}", id))
                .spawn(move || worker.run())
            {
                Ok(handle) => handles.push(handle),
                Err(e) => error!(worker = id, error = %e, "failed to spawn worker thread"),
            }
        }
        debug!(workers = handles.len(), estimate, "worker pool started");

        // Only the workers hold senders now: the channels close when they exit.
        drop(outcome_tx);
        drop(progress_tx);

        Self {
            num_workers: handles.len(),
            handles: Some(handles),
            aggregator,
            outcome_rx: Some(outcome_rx),
            stop_flag,
            attempts: 0,
            start_time: Instant::now(),
        }
    }

    /// Blocks until a worker finds a match and returns the accepted one.
    ///
    /// On the first `Found` the workers are stopped and joined. Each of them
    /// finishes the seed it already drew, so every match drawn earlier than
    /// the first arrival is then waiting in the channel. Of those, the one
    /// with the lowest draw index is accepted, which keeps the result
    /// independent of the worker count.
    ///
    /// Worker failures are logged and tolerated while any worker is still
    /// searching; when none are left the last failure is returned. Setting
    /// `interrupt` abandons the wait with `Cancelled`.
    pub fn first_match(&mut self, interrupt: &AtomicBool) -> Result<(usize, Seed), SearchError> {
        let outcome_rx = self.outcome_rx.clone().ok_or(SearchError::Cancelled)?;
        let mut live = self.num_workers;
        let mut last_error = None;

        while live > 0 {
            if interrupt.load(Ordering::Relaxed) {
                return Err(SearchError::Cancelled);
            }

            match outcome_rx.recv_timeout(POLL_INTERVAL) {
                Ok(WorkerOutcome::Found {
                    worker_id,
                    index,
                    seed,
                }) => {
                    self.stop();
                    self.join_workers();

                    let mut best = (index, worker_id, seed);
                    for outcome in outcome_rx.try_iter() {
                        if let WorkerOutcome::Found {
                            worker_id,
                            index,
                            seed,
                        } = outcome
                        {
                            if index < best.0 {
                                best = (index, worker_id, seed);
                            }
                        }
                    }

                    let (index, worker_id, seed) = best;
                    debug!(worker = worker_id, index, "match accepted");
                    return Ok((worker_id, seed));
                }
                Ok(WorkerOutcome::Failed { worker_id, error }) => {
                    live -= 1;
                    error!(worker = worker_id, %error, remaining = live, "worker failed");
                    last_error = Some(error);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SearchError::RandomSourceFailure("all workers exited without a result".into())
        }))
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the workers, closes the channels and joins every thread.
    ///
    /// Returns the total number of attempts. Calling it again is a no-op that
    /// returns the same total.
    pub fn shutdown(&mut self) -> u64 {
        self.stop();
        // Later outcome sends become no-ops.
        self.outcome_rx.take();

        self.join_workers();
        // Workers are gone, so the progress channel is closed and the
        // aggregator drains and returns.
        if let Some(aggregator) = self.aggregator.take() {
            match aggregator.join() {
                Ok(total) => self.attempts = total,
                Err(_) => error!("progress aggregator panicked"),
            }
            debug!(
                attempts = self.attempts,
                elapsed_ms = self.elapsed().as_millis() as u64,
                "worker pool stopped"
            );
        }
        self.attempts
    }

    fn join_workers(&mut self) {
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                if handle.join().is_err() {
                    error!("worker thread panicked");
                }
            }
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::SeedSequence;

    fn options(workers: usize) -> SearchOptions {
        SearchOptions {
            workers,
            progress_interval: 5,
            quiet: true,
        }
    }

    fn seeds(n: u8) -> Vec<Seed> {
        (0..n).map(|i| Seed::from_bytes([i; 32])).collect()
    }

    #[test]
    fn test_simultaneous_matches_accept_one() {
        // every address matches the empty prefix, so all workers find one
        let prefixes = PrefixSet::new([""]).unwrap();
        let candidates = seeds(8);
        let mut pool = WorkerPool::spawn(
            &prefixes,
            &options(8),
            SeedSequence::new(candidates.clone()),
            0.5,
        );
        assert_eq!(pool.num_workers(), 8);

        let (_, seed) = pool.first_match(&AtomicBool::new(false)).unwrap();
        // whichever worker delivered first, the earliest draw is accepted
        assert_eq!(seed, candidates[0]);
        assert!(pool.is_stopped());

        pool.shutdown();
        // the receiver is gone; nothing further can be accepted
        assert_eq!(
            pool.first_match(&AtomicBool::new(false)),
            Err(SearchError::Cancelled)
        );
    }

    #[test]
    fn test_shutdown_twice_is_harmless() {
        let prefixes = PrefixSet::new(["zzzzzzzzzzzz"]).unwrap();
        let mut pool = WorkerPool::spawn(&prefixes, &options(2), SeedSequence::new(seeds(20)), 1.0);

        let result = pool.first_match(&AtomicBool::new(false));
        assert!(matches!(result, Err(SearchError::RandomSourceFailure(_))));

        let first = pool.shutdown();
        assert_eq!(first, 20);
        assert_eq!(pool.shutdown(), first);
    }

    #[test]
    fn test_interrupt_cancels_wait() {
        let prefixes = PrefixSet::new(["zzzzzzzzzzzz"]).unwrap();
        let mut pool = WorkerPool::spawn(
            &prefixes,
            &options(2),
            crate::worker::OsSeedSource,
            1.0,
        );

        let interrupt = AtomicBool::new(true);
        assert_eq!(pool.first_match(&interrupt), Err(SearchError::Cancelled));
        pool.shutdown();
    }
}
