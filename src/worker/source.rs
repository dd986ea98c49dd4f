//! Seed sources feeding the search workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::Seed;
use crate::error::SearchError;

/// A seed and its position in the source's draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// Draw order across all clones of the source; lower was drawn earlier
    pub index: u64,
    pub seed: Seed,
}

/// Supplies one seed per attempt.
///
/// Every worker receives its own clone. Clones may share state: a shared
/// sequence hands each seed to exactly one worker.
pub trait SeedSource: Clone + Send + 'static {
    /// Draws the next seed. An error is fatal to the calling worker.
    fn next_seed(&mut self) -> Result<Draw, SearchError>;
}

/// Seeds drawn from the operating system's secure random generator.
///
/// Random draws have no meaningful order, so every draw has index 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    #[inline]
    fn next_seed(&mut self) -> Result<Draw, SearchError> {
        let mut bytes = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SearchError::RandomSourceFailure(e.to_string()))?;
        Ok(Draw {
            index: 0,
            seed: Seed::from_bytes(bytes),
        })
    }
}

/// A fixed, shared sequence of seeds for reproducible searches.
///
/// All clones draw from the same cursor, so across any number of workers
/// each seed is handed out once and in order. Once the sequence runs dry
/// every draw fails with `RandomSourceFailure`.
#[derive(Debug, Clone)]
pub struct SeedSequence {
    seeds: Arc<Vec<Seed>>,
    cursor: Arc<AtomicUsize>,
}

impl SeedSequence {
    pub fn new(seeds: Vec<Seed>) -> Self {
        Self {
            seeds: Arc::new(seeds),
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many seeds have been handed out.
    pub fn drawn(&self) -> usize {
        self.cursor.load(Ordering::SeqCst).min(self.seeds.len())
    }
}

impl SeedSource for SeedSequence {
    fn next_seed(&mut self) -> Result<Draw, SearchError> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let seed = self
            .seeds
            .get(index)
            .copied()
            .ok_or_else(|| SearchError::RandomSourceFailure("seed sequence exhausted".into()))?;
        Ok(Draw {
            index: index as u64,
            seed,
        })
    }
}
