//! Nano account address representation and validation.

use std::fmt;

use blake2::digest::consts::U5;
use blake2::{Blake2b, Digest};

use super::base32;

type Blake2b40 = Blake2b<U5>;

/// Prefix written in front of every encoded address.
pub const ADDRESS_PREFIX: &str = "nano_";

/// Legacy prefix still accepted when parsing.
const LEGACY_PREFIX: &str = "xrb_";

/// Number of leading characters carrying no information about the key:
/// `nano_` plus the first key symbol, which is always `1` or `3`.
pub const ADDRESS_PREFIX_SKIP: usize = 6;

const KEY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;

/// Errors produced when parsing an address string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address must start with nano_ or xrb_")]
    MissingPrefix,

    #[error("invalid encoded length: {0}")]
    InvalidLength(usize),

    #[error("invalid address character: {0:?}")]
    InvalidCharacter(char),

    #[error("non-zero padding bits")]
    NonZeroPadding,

    #[error("checksum does not match public key")]
    ChecksumMismatch,
}

/// A checksummed Nano account address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Encodes a public key as an address.
    ///
    /// The key is padded with 4 zero bits to 260 bits (52 symbols), followed
    /// by the byte-reversed 40-bit BLAKE2b digest of the key (8 symbols).
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let mut encoded =
            String::with_capacity(ADDRESS_PREFIX.len() + KEY_CHARS + CHECKSUM_CHARS);
        encoded.push_str(ADDRESS_PREFIX);
        encoded.push_str(&base32::encode(public_key, KEY_CHARS));
        encoded.push_str(&base32::encode(&checksum(public_key), CHECKSUM_CHARS));
        Self(encoded)
    }

    /// Parses an address and returns the public key it encodes.
    pub fn parse(s: &str) -> Result<[u8; 32], AddressError> {
        let body = s
            .strip_prefix(ADDRESS_PREFIX)
            .or_else(|| s.strip_prefix(LEGACY_PREFIX))
            .ok_or(AddressError::MissingPrefix)?;

        if body.len() != KEY_CHARS + CHECKSUM_CHARS {
            return Err(AddressError::InvalidLength(body.len()));
        }
        // The length check above counted bytes; reject multi-byte chars before slicing.
        if let Some(c) = body.chars().find(|c| !c.is_ascii()) {
            return Err(AddressError::InvalidCharacter(c));
        }

        let (key_part, checksum_part) = body.split_at(KEY_CHARS);
        let public_key = base32::decode::<32>(key_part)?;
        let expected = base32::decode::<5>(checksum_part)?;

        if checksum(&public_key) != expected {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(public_key)
    }

    /// Wraps a string without encoding or validating it.
    #[cfg(test)]
    pub(crate) fn new_unchecked(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the full address string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part of the address a vanity prefix is compared against.
    #[inline]
    pub fn comparison_region(&self) -> &str {
        &self.0[ADDRESS_PREFIX_SKIP..]
    }
}

/// Returns true when `address` is well formed and its embedded checksum
/// matches the public key it encodes.
pub fn validate_address(address: &str) -> bool {
    Address::parse(address).is_ok()
}

fn checksum(public_key: &[u8; 32]) -> [u8; 5] {
    let mut out = [0u8; 5];
    out.copy_from_slice(&Blake2b40::digest(public_key));
    out.reverse();
    out
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
