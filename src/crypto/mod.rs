//! Cryptographic operations for Nano key and address generation.
//!
//! This module provides:
//! - Seed handling (256-bit root secrets)
//! - Keypair derivation using BLAKE2b and Ed25519
//! - Address encoding and checksum validation over the Nano base32 alphabet

mod address;
mod base32;
mod keypair;
mod seed;

pub use address::{validate_address, Address, AddressError, ADDRESS_PREFIX_SKIP};
pub use base32::ALPHABET;
pub(crate) use base32::is_symbol;
pub use keypair::Keypair;
pub use seed::Seed;
