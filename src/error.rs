//! Errors surfaced by a vanity search.

/// Everything that can end a search without a match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid character {character:?} in prefix {prefix:?}")]
    InvalidPrefixCharacter { prefix: String, character: char },

    #[error("No prefixes given")]
    NoPrefixes,

    #[error("Failed to generate random seed: {0}")]
    RandomSourceFailure(String),

    #[error(
        "Address generated had an invalid checksum (seed {seed}, address {address}). \
         This is a bug, please report it."
    )]
    ChecksumMismatch { seed: String, address: String },

    #[error(
        "Re-derived address {address} no longer matches any prefix. \
         This is a bug, please report it."
    )]
    DerivationMismatch { address: String },

    #[error("Search cancelled")]
    Cancelled,
}
