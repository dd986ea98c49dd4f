//! Prefix matching for Nano addresses.
//!
//! Prefixes are compared against the address after the fixed
//! non-informative window (`nano_` and the padding symbol).

mod prefix;

pub use prefix::{estimated_iterations, validate_prefix, PrefixSet};
