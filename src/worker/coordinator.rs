//! Search coordination: one pool per search, earliest-drawn match wins.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{error, info};

use crate::crypto::{validate_address, Address, Keypair, Seed};
use crate::error::SearchError;
use crate::matcher::PrefixSet;

use super::pool::{SearchOptions, WorkerPool};
use super::SeedSource;

/// Result of a successful vanity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityMatch {
    /// The wallet seed
    pub seed: Seed,
    /// The account address derived from the seed at index 0
    pub address: Address,
    /// The requested prefix the address matched
    pub prefix: String,
    /// The ID of the worker that found this result
    pub worker_id: usize,
    /// Attempts made by all workers during this search
    pub attempts: u64,
}

/// Runs searches for a fixed prefix set.
pub struct Coordinator<S> {
    prefixes: PrefixSet,
    options: SearchOptions,
    source: S,
    /// External cancellation, e.g. from a Ctrl-C handler
    interrupt: Arc<AtomicBool>,
}

impl<S: SeedSource> Coordinator<S> {
    /// Creates a coordinator. The prefix set is validated on construction,
    /// so no worker ever starts with a malformed prefix.
    pub fn new(prefixes: PrefixSet, options: SearchOptions, source: S) -> Self {
        Self {
            prefixes,
            options,
            source,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a clone of the interrupt flag for external use (e.g., signal handlers).
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    /// Returns the prefixes being searched for.
    pub fn prefixes(&self) -> &PrefixSet {
        &self.prefixes
    }

    /// Returns the expected number of attempts per search.
    pub fn estimated_iterations(&self) -> f64 {
        self.prefixes.estimated_iterations()
    }

    /// Runs one search to completion.
    ///
    /// Spawns the pool, waits for the first match, tears the pool down and
    /// re-derives the match to confirm its checksum.
    pub fn search(&self) -> Result<VanityMatch, SearchError> {
        let estimate = self.estimated_iterations();
        let mut pool =
            WorkerPool::spawn(&self.prefixes, &self.options, self.source.clone(), estimate);

        let accepted = pool.first_match(&self.interrupt);
        let attempts = pool.shutdown();
        let (worker_id, seed) = accepted?;

        let found = self.confirm(worker_id, seed, attempts)?;
        info!(
            worker = found.worker_id,
            prefix = %found.prefix,
            attempts = found.attempts,
            "vanity address found"
        );
        Ok(found)
    }

    /// Runs `count` searches (0 = until interrupted), handing each match to
    /// `on_match`. Returns the number of matches found.
    pub fn run<F>(&self, count: usize, mut on_match: F) -> Result<usize, SearchError>
    where
        F: FnMut(&VanityMatch),
    {
        let mut found = 0;
        while count == 0 || found < count {
            let result = self.search()?;
            found += 1;
            on_match(&result);
        }
        Ok(found)
    }

    /// Re-derives the address from the delivered seed and checks it.
    fn confirm(
        &self,
        worker_id: usize,
        seed: Seed,
        attempts: u64,
    ) -> Result<VanityMatch, SearchError> {
        let address = Keypair::from_seed(&seed, 0).address().clone();
        let prefix = verify_match(&self.prefixes, &seed, &address)?;

        Ok(VanityMatch {
            seed,
            address,
            prefix,
            worker_id,
            attempts,
        })
    }
}

/// Checks the address of an accepted seed: its checksum must validate and it
/// must still match a prefix. Returns the credited prefix.
fn verify_match(
    prefixes: &PrefixSet,
    seed: &Seed,
    address: &Address,
) -> Result<String, SearchError> {
    if !validate_address(address.as_str()) {
        error!(address = %address, "derived address failed checksum validation");
        return Err(SearchError::ChecksumMismatch {
            seed: seed.to_hex(),
            address: address.to_string(),
        });
    }

    prefixes
        .matches(address)
        .map(str::to_string)
        .ok_or_else(|| SearchError::DerivationMismatch {
            address: address.to_string(),
        })
}
