//! # nano_vanity
//!
//! Multi-threaded Nano vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Seed, keypair and address derivation
//! - `matcher`: Prefix validation, matching and difficulty estimates
//! - `worker`: Workers, pool, progress and search coordination
//! - `config`: Runtime configuration
//! - `error`: Search error taxonomy

pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod worker;

pub use config::Config;
pub use crypto::{validate_address, Address, Keypair, Seed, ALPHABET};
pub use error::SearchError;
pub use matcher::{estimated_iterations, PrefixSet};
pub use worker::{
    Coordinator, Draw, OsSeedSource, SearchOptions, SeedSequence, SeedSource, VanityMatch,
};
