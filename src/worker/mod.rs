//! Parallel search engine.
//!
//! This module provides:
//! - Seed sources (OS randomness, deterministic sequences)
//! - CPU workers running the attempt loop
//! - A worker pool with cooperative shutdown
//! - Progress aggregation across workers
//! - The coordinator that accepts the first match

mod coordinator;
mod cpu;
mod pool;
mod progress;
mod source;

pub use coordinator::{Coordinator, VanityMatch};
pub use cpu::{SearchWorker, WorkerOutcome};
pub use pool::{SearchOptions, WorkerPool};
pub use progress::{format_number, format_progress, ProgressAggregator};
pub use source::{Draw, OsSeedSource, SeedSequence, SeedSource};
