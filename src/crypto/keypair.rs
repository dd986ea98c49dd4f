//! Nano keypair derivation.

use std::fmt;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::VerifyingKey;

use super::{Address, Seed};

type Blake2b256 = Blake2b<U32>;

/// A Nano keypair together with its derived address.
#[derive(Clone)]
pub struct Keypair {
    /// The private key bytes (32 bytes)
    private_key: [u8; 32],
    /// The Ed25519 public key (32 bytes)
    public_key: [u8; 32],
    /// The derived account address
    address: Address,
}

impl Keypair {
    /// Derives the keypair at `index` of a seed.
    ///
    /// Process:
    /// 1. private key = BLAKE2b-256(seed || index as big-endian u32)
    /// 2. expand the private key with BLAKE2b-512 instead of SHA-512
    /// 3. public key = clamped lower half of the expansion times the base point
    pub fn from_seed(seed: &Seed, index: u32) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(seed.as_bytes());
        hasher.update(index.to_be_bytes());

        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&hasher.finalize());

        Self::from_private_key(private_key)
    }

    fn from_private_key(private_key: [u8; 32]) -> Self {
        let public_key = Self::derive_public_key(&private_key);
        let address = Address::from_public_key(&public_key);

        Self {
            private_key,
            public_key,
            address,
        }
    }

    #[inline]
    fn derive_public_key(private_key: &[u8; 32]) -> [u8; 32] {
        let mut expanded = [0u8; 64];
        expanded.copy_from_slice(&Blake2b512::digest(private_key));

        let secret = ExpandedSecretKey::from_bytes(&expanded);
        VerifyingKey::from(&secret).to_bytes()
    }

    /// Returns the private key as an uppercase hex string.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(self.private_key)
    }

    /// Returns the public key bytes.
    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

// The private key is left out so a keypair can be logged safely.
impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &hex::encode_upper(self.public_key))
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::validate_address;

    fn counter_seed(n: u64) -> Seed {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Seed::from_bytes(bytes)
    }

    #[test]
    fn test_zero_seed_vector() {
        let keypair = Keypair::from_seed(&Seed::from_bytes([0u8; 32]), 0);

        assert_eq!(
            keypair.private_key_hex(),
            "9F0E444C69F77A49BD0BE89DB92C38FE713E0963165CCA12FAF5712D7657120F"
        );
        assert_eq!(
            hex::encode_upper(keypair.public_key()),
            "C008B814A7D269A1FA3C6528B19201A24D797912DB9996FF02A1FF356E45552B"
        );
        assert_eq!(
            keypair.address().as_str(),
            "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7"
        );
    }

    #[test]
    fn test_index_changes_key() {
        let seed = Seed::from_bytes([0u8; 32]);
        let second = Keypair::from_seed(&seed, 1);
        assert_eq!(
            second.address().as_str(),
            "nano_3rrf6cus8pye6o1kzi5n6wwjof8bjb7ff4xcgesi3njxid6x64pms6onw1f9"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = Seed::from_bytes([0x01; 32]);
        let a = Keypair::from_seed(&seed, 0);
        let b = Keypair::from_seed(&seed, 0);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.address(), b.address());
        assert_eq!(
            a.address().as_str(),
            "nano_3aeouy35efmmtcuasrkbphxe7bsd8p6saf7fkczb69seqwwqbeqk8hgb4hzi"
        );
    }

    #[test]
    fn test_derived_addresses_pass_checksum_validation() {
        for n in 0..300 {
            let keypair = Keypair::from_seed(&counter_seed(n), 0);
            let address = keypair.address().as_str();
            assert!(validate_address(address), "seed {} gave {}", n, address);
            assert_eq!(address.len(), 65);
        }
    }

    #[test]
    fn test_debug_omits_private_key() {
        let keypair = Keypair::from_seed(&Seed::from_bytes([0u8; 32]), 0);
        let debug = format!("{:?}", keypair);
        assert!(!debug.contains(&keypair.private_key_hex()));
        assert!(debug.contains("nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7"));
    }
}
