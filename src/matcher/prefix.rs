//! Prefix set validation, matching and difficulty estimation.

use crate::crypto::{is_symbol, Address};
use crate::error::SearchError;

/// Number of symbols in the address alphabet.
const ALPHABET_SIZE: f64 = 32.0;

/// Checks that every character of `prefix` is an address symbol.
pub fn validate_prefix(prefix: &str) -> Result<(), SearchError> {
    match prefix.chars().find(|&c| !is_symbol(c)) {
        Some(character) => Err(SearchError::InvalidPrefixCharacter {
            prefix: prefix.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// Expected number of attempts before some address starts with `prefix`.
///
/// This is the mean of a geometric distribution, halved: `32^len / 2`.
/// Useful for progress display only; actual runs vary widely.
pub fn estimated_iterations(prefix: &str) -> f64 {
    ALPHABET_SIZE.powi(prefix.chars().count() as i32) / 2.0
}

/// A validated, normalized set of requested prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSet {
    prefixes: Vec<String>,
}

impl PrefixSet {
    /// Normalizes (trim + lowercase) and validates the requested prefixes.
    ///
    /// Fails on the first prefix containing a non-alphabet character, so a
    /// single malformed entry rejects the whole set.
    pub fn new<I, S>(prefixes: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes: Vec<String> = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .collect();

        if prefixes.is_empty() {
            return Err(SearchError::NoPrefixes);
        }
        for prefix in &prefixes {
            validate_prefix(prefix)?;
        }

        Ok(Self { prefixes })
    }

    /// Returns the normalized prefixes.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns the longest prefix, which dominates the difficulty.
    pub fn longest(&self) -> &str {
        self.prefixes
            .iter()
            .max_by_key(|p| p.len())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns the estimate for the longest prefix.
    pub fn estimated_iterations(&self) -> f64 {
        estimated_iterations(self.longest())
    }

    /// Returns the first prefix the address starts with, if any.
    #[inline]
    pub fn matches(&self, address: &Address) -> Option<&str> {
        let region = address.comparison_region();
        self.prefixes
            .iter()
            .find(|p| region.starts_with(p.as_str()))
            .map(String::as_str)
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_iterations();
        if diff <= 1e3 {
            "Very Easy (< 1 second)".into()
        } else if diff <= 1e5 {
            "Easy (seconds)".into()
        } else if diff <= 1e7 {
            "Medium (minutes)".into()
        } else if diff <= 1e9 {
            "Hard (hours)".into()
        } else {
            "Very Hard (days or more)".into()
        }
    }
}
